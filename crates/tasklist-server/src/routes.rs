use axum::Router;
use axum::routing::{get, post};
use tasklist_core::procedures as paths;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_task, delete_task, get_task, health_check, list_tasks, set_task_done, update_task,
};
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(paths::HEALTH, get(health_check))
        .route(paths::TASK_LIST, get(list_tasks))
        .route(paths::TASK_GET, post(get_task))
        .route(paths::TASK_CREATE, post(create_task))
        .route(paths::TASK_UPDATE, post(update_task))
        .route(paths::TASK_SET_DONE, post(set_task_done))
        .route(paths::TASK_DELETE, post(delete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
