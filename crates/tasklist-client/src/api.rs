//! The task procedures as seen from a client.

use std::future::Future;

use tasklist_core::entities::Task;
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput};

use crate::error::ClientError;

/// Remote (or in-process) access to the task service.
///
/// Futures are `Send` so implementations can drive a background refresh
/// task as well as foreground actions.
pub trait TaskApi: Send + Sync {
    /// All tasks in service order.
    fn list(&self) -> impl Future<Output = Result<Vec<Task>, ClientError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn create(
        &self,
        input: &CreateTaskInput,
    ) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn update(
        &self,
        input: &UpdateTaskInput,
    ) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn set_done(
        &self,
        id: &str,
        done: bool,
    ) -> impl Future<Output = Result<Task, ClientError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}
