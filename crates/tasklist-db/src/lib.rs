//! # tasklist-db
//!
//! libSQL database operations for Tasklist.
//!
//! Owns the relational state: the `tasks` table and the `retired_ids`
//! ledger that keeps deleted IDs from being reissued. `TaskService`
//! exposes the five task procedures on top of a `TasklistDb`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Central database handle.
///
/// Wraps a libSQL database and its single connection and runs migrations
/// on open. Transactions are connection-scoped, so every repository call
/// holds the connection lock from its first statement to its last.
pub struct TasklistDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Mutex<libsql::Connection>,
}

impl TasklistDb {
    /// Open a local database at the given path (or `":memory:"`).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let tasklist_db = Self {
            db,
            conn: Mutex::new(conn),
        };
        tasklist_db.run_migrations().await?;
        tracing::debug!(path, "opened tasklist database");
        Ok(tasklist_db)
    }

    /// Exclusive access to the libSQL connection. Waits for any other
    /// caller to finish its statements or transaction first.
    pub async fn conn(&self) -> MutexGuard<'_, libsql::Connection> {
        self.conn.lock().await
    }
}

/// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1"`.
///
/// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
/// Uniqueness against existing and retired rows is the caller's concern.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id(conn: &libsql::Connection, prefix: &str) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}
