//! The most recently fetched task collection, shared between foreground
//! actions and the background poller.
//!
//! Whoever writes last wins; readers can subscribe to be woken on change.

use std::sync::Arc;

use tasklist_core::entities::Task;
use tokio::sync::watch;

use crate::api::TaskApi;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    tx: Arc<watch::Sender<Vec<Task>>>,
}

impl Default for TaskSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSnapshot {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    /// Swap in a freshly fetched collection.
    pub fn replace(&self, tasks: Vec<Task>) {
        self.tx.send_replace(tasks);
    }

    /// A copy of the current collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<Task> {
        self.tx.borrow().iter().find(|t| t.id == id).cloned()
    }

    /// Receiver that observes every subsequent `replace`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tx.subscribe()
    }
}

/// Fetch the full collection and publish it.
///
/// # Errors
///
/// Returns the fetch error; the snapshot is left untouched.
pub async fn refresh_into<A: TaskApi>(api: &A, snapshot: &TaskSnapshot) -> Result<usize, ClientError> {
    let tasks = api.list().await?;
    let count = tasks.len();
    snapshot.replace(tasks);
    tracing::debug!(count, "task snapshot refreshed");
    Ok(count)
}
