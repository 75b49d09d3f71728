use axum::{
    Router,
    http::{HeaderName, Method},
    routing::{get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        healthcheck, index,
        rectangles::{
            create_rectangle, delete_rectangle, get_rectangle, list_rectangles, update_rectangle,
        },
        route_not_found,
        students::{
            create_student, delete_student, find_student_by_name, get_student, list_students,
            update_student,
        },
        tasks::{
            complete_task, create_task, delete_task, get_task, list_tasks, reopen_task,
            update_task,
        },
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(index))
        .route("/health", get(healthcheck))
        .route("/rectangles", post(create_rectangle).get(list_rectangles))
        .route(
            "/rectangles/{id}",
            get(get_rectangle)
                .put(update_rectangle)
                .delete(delete_rectangle),
        )
        .route("/students", post(create_student).get(list_students))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/by-name/{name}", get(find_student_by_name))
        .route("/tasks", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/complete", patch(complete_task))
        .route("/tasks/{id}/pending", patch(reopen_task))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
