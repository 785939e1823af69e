//! Service layer for task procedures.
//!
//! `TaskService` wraps `TasklistDb`. The task repository methods are
//! implemented as `impl TaskService` blocks in `repos::task`.
//!
//! Every mutation follows this protocol:
//! 1. Validate the input into typed values (no SQL on failure)
//! 2. Execute SQL, checking the affected row count for not-found
//! 3. Return the resulting record as stored

use crate::TasklistDb;
use crate::error::DatabaseError;

/// Orchestrates validated task mutations against the database.
pub struct TaskService {
    db: TasklistDb,
}

impl TaskService {
    /// Open a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TasklistDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `TasklistDb`.
    #[must_use]
    pub const fn from_db(db: TasklistDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TasklistDb {
        &self.db
    }
}
