//! Procedure handlers. Each one validates its body, calls the task service
//! and returns the stored record.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tasklist_core::entities::Task;
use tasklist_core::inputs::{CreateTaskInput, SetDoneInput, TaskIdInput, UpdateTaskInput};
use tasklist_core::responses::{DeleteResponse, HealthResponse};
use tasklist_db::error::DatabaseError;

use crate::error::ApiErrorResponse;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /rpc/task.list`
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.service.list_tasks().await?))
}

/// `POST /rpc/task.get`
pub async fn get_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskIdInput>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(input) = payload?;
    input.validate().map_err(DatabaseError::from)?;
    Ok(Json(state.service.get_task(&input.id).await?))
}

/// `POST /rpc/task.create`, answering 201 with the new task.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(input) = payload?;
    let task = state.service.create_task(&input).await?;
    tracing::info!(task_id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `POST /rpc/task.update`
pub async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskInput>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(input) = payload?;
    Ok(Json(state.service.update_task(&input).await?))
}

/// `POST /rpc/task.set_done`
pub async fn set_task_done(
    State(state): State<AppState>,
    payload: Result<Json<SetDoneInput>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(input) = payload?;
    Ok(Json(state.service.set_task_done(&input.id, input.done).await?))
}

/// `POST /rpc/task.delete`
pub async fn delete_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskIdInput>, JsonRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Json(input) = payload?;
    let response = state.service.delete_task(&input.id).await?;
    tracing::info!(task_id = %input.id, "task deleted");
    Ok(Json(response))
}
