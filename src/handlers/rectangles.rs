use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use super::record_id;
use crate::{
    domain::{Rectangle, RectanglePayload, RectangleQuery},
    error::AppResult,
    extract::{JsonBody, QueryParams},
    models::ApiResponse,
    state::AppState,
    store::RecordView,
};

type RectangleView = RecordView<Rectangle>;

pub async fn create_rectangle(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RectanglePayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<RectangleView>>)> {
    let rectangle = payload.into_rectangle()?;
    let created = state.rectangles.insert(rectangle).await?;

    info!(id = created.id(), shape = ?created.derived.shape, "rectangle stored");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

pub async fn list_rectangles(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RectangleQuery>,
) -> AppResult<Json<ApiResponse<Vec<RectangleView>>>> {
    let filter = query.into_filter()?;
    let rectangles = state.rectangles.list(filter).await;
    Ok(Json(ApiResponse::listing(rectangles)))
}

pub async fn get_rectangle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RectangleView>>> {
    let id = record_id(&id)?;
    let rectangle = state.rectangles.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(rectangle)))
}

pub async fn update_rectangle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<RectanglePayload>,
) -> AppResult<Json<ApiResponse<RectangleView>>> {
    let id = record_id(&id)?;
    let patch = payload.into_patch()?;
    let updated = state.rectangles.update_by_id(id, patch).await?;

    info!(id, "rectangle updated");
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_rectangle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RectangleView>>> {
    let id = record_id(&id)?;
    let removed = state.rectangles.delete_by_id(id).await?;

    info!(id, "rectangle removed");
    Ok(Json(ApiResponse::ok(removed)))
}
