pub mod rectangles;
pub mod students;
pub mod tasks;

use axum::Json;
use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{ApiResponse, Endpoint, HealthStatus, ServiceIndex},
    validation::parse_record_id,
};

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /health", "service health"),
    ("POST /rectangles", "store a rectangle"),
    ("GET /rectangles?shape=", "list rectangles, optionally by shape"),
    ("GET /rectangles/{id}", "read one rectangle"),
    ("PUT /rectangles/{id}", "update width and/or height"),
    ("DELETE /rectangles/{id}", "remove a rectangle"),
    ("POST /students", "register a student with three grades"),
    ("GET /students?status=&name=", "list students, optionally filtered"),
    ("GET /students/{id}", "read one student"),
    ("GET /students/by-name/{name}", "look a student up by name"),
    ("PUT /students/{id}", "update name and/or grades"),
    ("DELETE /students/{id}", "remove a student"),
    ("POST /tasks", "create a task"),
    ("GET /tasks?completed=&state=&name=", "list tasks, optionally filtered"),
    ("GET /tasks/{id}", "read one task"),
    ("PUT /tasks/{id}", "update name and/or completion"),
    ("PATCH /tasks/{id}/complete", "mark a task completed"),
    ("PATCH /tasks/{id}/pending", "mark a task pending"),
    ("DELETE /tasks/{id}", "remove a task"),
];

pub async fn index() -> Json<ApiResponse<ServiceIndex>> {
    Json(ApiResponse::ok(ServiceIndex {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(route, description)| Endpoint { route, description })
            .collect(),
    }))
}

pub async fn healthcheck() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        ok: true,
        time: Utc::now(),
    }))
}

pub async fn route_not_found() -> AppError {
    AppError::not_found("route not found")
}

/// Id path segments are taken as text so that a malformed id is a 400, not a
/// generic extractor rejection.
pub(crate) fn record_id(raw: &str) -> AppResult<u64> {
    Ok(parse_record_id(raw)?)
}
