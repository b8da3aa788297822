//! Integration tests for the `/webtoons` resource.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{ALICE, BOB};

/// Create a webtoon as `token` and return the response `data` object.
async fn create_webtoon(pool: &PgPool, token: &str, title: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        "/api/v1/webtoons",
        Some(token),
        json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    body["data"].clone()
}

// --- Create ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_webtoon(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = common::post_json(
        app,
        "/api/v1/webtoons",
        Some(ALICE),
        json!({
            "title": "연애 실험실",
            "genre": "romance",
            "theme": "school",
            "number_of_cuts": 4
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["title"], "연애 실험실");
    assert_eq!(data["genre"], "romance");
    assert_eq!(data["status"], "published");
    assert_eq!(data["author_name"], "Anonymous");
    assert_eq!(data["view_count"], 0);
    assert_eq!(data["like_count"], 0);
    assert_eq!(data["is_owner"], true);
    assert_eq!(data["is_liked"], false);
    // The owner token never leaves the server.
    assert!(data.get("owner_token").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_blank_title(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/webtoons",
        Some(ALICE),
        json!({ "title": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// --- Get ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_bumps_view_count(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Viewed").await;
    let uri = format!("/api/v1/webtoons/{}", created["id"].as_str().unwrap());

    let response = common::get(common::build_test_app(pool.clone()), &uri, Some(BOB)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["view_count"], 1);
    assert_eq!(body["data"]["is_owner"], false);

    let response = common::get(common::build_test_app(pool.clone()), &uri, Some(BOB)).await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["view_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/webtoons/{}", uuid::Uuid::new_v4());
    let response = common::get(app, &uri, Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// --- List ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_envelope_and_pagination(pool: PgPool) {
    for title in ["First", "Second", "Third"] {
        create_webtoon(&pool, ALICE, title).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/webtoons?page=1&per_page=2", Some(BOB)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 2);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Insertion order.
    assert_eq!(data[0]["title"], "First");
    assert_eq!(data[1]["title"], "Second");

    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/webtoons?page=2&per_page=2", Some(BOB)).await;
    let body = common::body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Third");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_unknown_status_filter(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/webtoons?status=archived", Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_draft_hidden_from_other_sessions(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Secret draft").await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = common::put_json(
        app,
        &format!("/api/v1/webtoons/{id}"),
        Some(ALICE),
        json!({ "status": "draft" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Gone from the public list for Bob, still listed for the owner.
    let body = common::body_json(
        common::get(common::build_test_app(pool.clone()), "/api/v1/webtoons", Some(BOB)).await,
    )
    .await;
    assert_eq!(body["total"], 0);

    let body = common::body_json(
        common::get(
            common::build_test_app(pool.clone()),
            "/api/v1/webtoons",
            Some(ALICE),
        )
        .await,
    )
    .await;
    assert_eq!(body["total"], 1);

    // A direct link still resolves; only listings filter by status.
    let response = common::get(
        common::build_test_app(pool),
        &format!("/api/v1/webtoons/{id}"),
        Some(BOB),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// --- My webtoons ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_my_webtoons_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/webtoons/my", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // No cookie minted alongside a rejection.
    assert!(common::session_cookie(&response).is_none());

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_my_webtoons_lists_only_callers(pool: PgPool) {
    create_webtoon(&pool, ALICE, "Mine 1").await;
    create_webtoon(&pool, ALICE, "Mine 2").await;
    create_webtoon(&pool, BOB, "Theirs").await;

    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/webtoons/my", Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["total"], 2);
    for webtoon in body["data"].as_array().unwrap() {
        assert_eq!(webtoon["is_owner"], true);
    }
}

// --- Update ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_by_owner(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Before").await;
    let uri = format!("/api/v1/webtoons/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool);
    let response = common::put_json(
        app,
        &uri,
        Some(ALICE),
        json!({ "title": "After", "summary": "Reworked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["data"]["title"], "After");
    assert_eq!(body["data"]["summary"], "Reworked");
    // Untouched fields survive the sparse patch.
    assert_eq!(body["data"]["status"], "published");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_by_non_owner_forbidden(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Protected").await;
    let uri = format!("/api/v1/webtoons/{}", created["id"].as_str().unwrap());

    let response = common::put_json(
        common::build_test_app(pool.clone()),
        &uri,
        Some(BOB),
        json!({ "title": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = common::body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");

    // The rejected patch must not have touched the row.
    let response = common::get(common::build_test_app(pool), &uri, Some(ALICE)).await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["title"], "Protected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_requires_session(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Locked").await;
    let uri = format!("/api/v1/webtoons/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool);
    let response = common::put_json(app, &uri, None, json!({ "title": "Anonymous edit" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// --- Delete ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_lifecycle(pool: PgPool) {
    let created = create_webtoon(&pool, ALICE, "Doomed").await;
    let uri = format!("/api/v1/webtoons/{}", created["id"].as_str().unwrap());

    let response = common::delete(common::build_test_app(pool.clone()), &uri, Some(BOB)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::delete(common::build_test_app(pool.clone()), &uri, Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(common::build_test_app(pool), &uri, Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
