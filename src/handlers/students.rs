use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use super::record_id;
use crate::{
    domain::{Student, StudentPayload, StudentQuery},
    error::AppResult,
    extract::{JsonBody, QueryParams},
    models::ApiResponse,
    state::AppState,
    store::RecordView,
};

type StudentView = RecordView<Student>;

pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<StudentPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<StudentView>>)> {
    let student = payload.into_student()?;
    let created = state.students.insert(student).await?;

    info!(id = created.id(), name = %created.fields().name, "student registered");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

pub async fn list_students(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<StudentQuery>,
) -> AppResult<Json<ApiResponse<Vec<StudentView>>>> {
    let filter = query.into_filter()?;
    let students = state.students.list(filter).await;
    Ok(Json(ApiResponse::listing(students)))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<StudentView>>> {
    let id = record_id(&id)?;
    let student = state.students.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(student)))
}

pub async fn find_student_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<StudentView>>> {
    let student = state.students.find_by_name(&name).await?;
    Ok(Json(ApiResponse::ok(student)))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StudentPayload>,
) -> AppResult<Json<ApiResponse<StudentView>>> {
    let id = record_id(&id)?;
    let patch = payload.into_patch()?;
    let updated = state.students.update_by_id(id, patch).await?;

    info!(id, status = ?updated.derived.status, "student updated");
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<StudentView>>> {
    let id = record_id(&id)?;
    let removed = state.students.delete_by_id(id).await?;

    info!(id, "student removed");
    Ok(Json(ApiResponse::ok(removed)))
}
