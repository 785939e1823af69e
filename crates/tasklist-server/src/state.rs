use std::sync::Arc;

use tasklist_db::service::TaskService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: TaskService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
