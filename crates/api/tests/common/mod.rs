#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gltr_api::config::ServerConfig;
use gltr_api::router::build_app_router;
use gltr_api::state::AppState;

/// Session tokens in the 32-hex shape the cookie layer accepts.
pub const ALICE: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const BOB: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. The session cookie stays non-Secure so
/// it round-trips over the plain-HTTP test transport.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_cookie_secure: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// stack (session cookies, CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send one request through the router. `session` rides in the Cookie header.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = session {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, session: Option<&str>) -> Response {
    request(app, Method::GET, uri, session, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    session: Option<&str>,
    body: serde_json::Value,
) -> Response {
    request(app, Method::POST, uri, session, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    session: Option<&str>,
    body: serde_json::Value,
) -> Response {
    request(app, Method::PUT, uri, session, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, session: Option<&str>) -> Response {
    request(app, Method::DELETE, uri, session, None).await
}

/// Parse the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The session token minted by the response, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let (pair, _) = header.split_once(';').unwrap_or((header, ""));
    let (name, value) = pair.split_once('=')?;
    (name == "session_id").then(|| value.to_string())
}
