//! In-process `TaskApi` backed directly by the task service, for
//! single-process use without a server.

use tasklist_core::entities::Task;
use tasklist_core::errors::CoreError;
use tasklist_core::inputs::{CreateTaskInput, UpdateTaskInput};
use tasklist_db::error::DatabaseError;
use tasklist_db::service::TaskService;

use crate::api::TaskApi;
use crate::error::ClientError;

impl From<DatabaseError> for ClientError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(CoreError::Validation(fields)) => Self::Validation(fields),
            DatabaseError::Core(err @ CoreError::NotFound { .. }) => Self::NotFound(err.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl TaskApi for TaskService {
    async fn list(&self) -> Result<Vec<Task>, ClientError> {
        Ok(self.list_tasks().await?)
    }

    async fn get(&self, id: &str) -> Result<Task, ClientError> {
        Ok(self.get_task(id).await?)
    }

    async fn create(&self, input: &CreateTaskInput) -> Result<Task, ClientError> {
        Ok(self.create_task(input).await?)
    }

    async fn update(&self, input: &UpdateTaskInput) -> Result<Task, ClientError> {
        Ok(self.update_task(input).await?)
    }

    async fn set_done(&self, id: &str, done: bool) -> Result<Task, ClientError> {
        Ok(self.set_task_done(id, done).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.delete_task(id).await?;
        Ok(())
    }
}
