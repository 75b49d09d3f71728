mod common;

use axum::http::{Method, StatusCode};
use common::{app, send_empty, send_raw};

#[tokio::test]
async fn missing_record_is_not_found_but_bad_id_is_validation() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/students/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "student 999 not found");

    for uri in ["/students/-1", "/students/abc", "/students/0", "/rectangles/1.5"] {
        let (status, body) = send_empty(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "id must be a positive integer");
    }
}

#[tokio::test]
async fn malformed_json_is_an_internal_error() {
    let app = app();

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/tasks",
        Some("{\"name\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "internal server error");

    let (_, all) = send_empty(&app, Method::GET, "/tasks").await;
    assert_eq!(all["total"], 0);
}

#[tokio::test]
async fn body_that_is_not_an_object_is_rejected() {
    let app = app();

    let (status, body) = send_raw(&app, Method::POST, "/rectangles", Some("5".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/students",
        Some(r#"["Ana", [5, 6, 7]]"#.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, all) = send_empty(&app, Method::GET, "/students").await;
    assert_eq!(all["total"], 0);
}

#[tokio::test]
async fn unknown_routes_use_the_error_envelope() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/courses").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "route not found");
}

#[tokio::test]
async fn index_and_health_are_available() {
    let app = app();

    let (status, health) = send_empty(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["data"]["ok"], true);

    let (status, index) = send_empty(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(index["data"]["name"], "recordkeeper");
    assert!(
        index["data"]["endpoints"]
            .as_array()
            .is_some_and(|endpoints| !endpoints.is_empty())
    );
}
