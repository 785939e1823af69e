//! Shared test utilities for tasklist-db unit tests.

use tasklist_core::entities::Task;
use tasklist_core::inputs::CreateTaskInput;

use crate::service::TaskService;

/// Create an in-memory `TaskService`.
pub async fn test_service() -> TaskService {
    TaskService::new_local(":memory:").await.unwrap()
}

/// Create a task with only a title and an optional due date string.
pub async fn create_titled(svc: &TaskService, title: &str, due_date: Option<&str>) -> Task {
    svc.create_task(&CreateTaskInput {
        title: title.into(),
        due_date: due_date.map(String::from),
        ..Default::default()
    })
    .await
    .unwrap()
}
