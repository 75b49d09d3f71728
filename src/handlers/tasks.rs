use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use super::record_id;
use crate::{
    domain::{Task, TaskPatch, TaskPayload, TaskQuery},
    error::AppResult,
    extract::{JsonBody, QueryParams},
    models::ApiResponse,
    state::AppState,
    store::RecordView,
};

type TaskView = RecordView<Task>;

pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<TaskView>>)> {
    let task = payload.into_task()?;
    let created = state.tasks.insert(task).await?;

    info!(id = created.id(), name = %created.fields().name, "task created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TaskQuery>,
) -> AppResult<Json<ApiResponse<Vec<TaskView>>>> {
    let filter = query.into_filter()?;
    let tasks = state.tasks.list(filter).await;
    Ok(Json(ApiResponse::listing(tasks)))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    let id = record_id(&id)?;
    let task = state.tasks.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<TaskPayload>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    let id = record_id(&id)?;
    let patch = payload.into_patch()?;
    let updated = state.tasks.update_by_id(id, patch).await?;

    info!(id, "task updated");
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn complete_task(
    state: State<AppState>,
    id: Path<String>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    set_completion(state, id, true).await
}

pub async fn reopen_task(
    state: State<AppState>,
    id: Path<String>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    set_completion(state, id, false).await
}

async fn set_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    completed: bool,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    let id = record_id(&id)?;
    let updated = state
        .tasks
        .update_by_id(id, TaskPatch::completion(completed))
        .await?;

    info!(id, state = ?updated.derived.state, "task completion changed");
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TaskView>>> {
    let id = record_id(&id)?;
    let removed = state.tasks.delete_by_id(id).await?;

    info!(id, "task removed");
    Ok(Json(ApiResponse::ok(removed)))
}
