//! Health endpoint and middleware-stack integration tests.

mod common;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use axum::http::{Method, Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;

// --- Health ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check_reports_ok(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/nonexistent", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// --- Request ID ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/health", None).await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    // UUIDs serialize as 36 chars with hyphens.
    assert_eq!(request_id.len(), 36);
}

// --- CORS ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/webtoons")
        .header(ORIGIN, "http://localhost:5173")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("allow-origin header missing")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_METHODS)
        .expect("allow-methods header missing")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("GET"));
}

// --- Session cookies ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_request_mints_session_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/webtoons", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = common::session_cookie(&response).expect("no session cookie issued");
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_session_cookie_is_not_reissued(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/webtoons", Some(common::ALICE)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::session_cookie(&response).is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_session_cookie_is_replaced(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Too short to be a session token; the middleware mints a fresh one.
    let response = common::get(app, "/api/v1/webtoons", Some("abc123")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = common::session_cookie(&response).expect("no replacement cookie issued");
    assert_eq!(token.len(), 32);
    assert_ne!(token, "abc123");
}
