//! Integration tests for likes and comment threads over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{ALICE, BOB};

async fn create_webtoon(pool: &PgPool, token: &str, title: &str) -> String {
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
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_comment(
    pool: &PgPool,
    token: &str,
    webtoon_id: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(token),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    body["data"].clone()
}

// --- Likes ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_toggle_cycle(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Likeable").await;
    let uri = format!("/api/v1/webtoons/{webtoon_id}/like");

    let response = common::post_json(common::build_test_app(pool.clone()), &uri, Some(BOB), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["like_count"], 1);

    // Second toggle takes the like back.
    let response = common::post_json(common::build_test_app(pool.clone()), &uri, Some(BOB), json!({})).await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["like_count"], 0);

    // The denormalized counter on the webtoon stays in sync.
    let response = common::get(
        common::build_test_app(pool),
        &format!("/api/v1/webtoons/{webtoon_id}"),
        Some(BOB),
    )
    .await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["like_count"], 0);
    assert_eq!(body["data"]["is_liked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_missing_webtoon_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/webtoons/{}/like", uuid::Uuid::new_v4());
    let response = common::post_json(app, &uri, Some(BOB), json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_my_likes(pool: PgPool) {
    let first = create_webtoon(&pool, ALICE, "First").await;
    let second = create_webtoon(&pool, ALICE, "Second").await;

    let response = common::get(common::build_test_app(pool.clone()), "/api/v1/likes/my", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    for id in [&first, &second] {
        let uri = format!("/api/v1/webtoons/{id}/like");
        common::post_json(common::build_test_app(pool.clone()), &uri, Some(BOB), json!({})).await;
    }

    let response = common::get(common::build_test_app(pool), "/api/v1/likes/my", Some(BOB)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let likes = body["data"].as_array().unwrap();
    assert_eq!(likes.len(), 2);
    assert_eq!(likes[0]["webtoon_id"], first);
    assert_eq!(likes[1]["webtoon_id"], second);
    assert!(likes[0].get("session_token").is_none());
}

// --- Comments ---

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_create_defaults(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;

    let comment = create_comment(&pool, BOB, &webtoon_id, json!({ "content": "재밌어요!" })).await;
    assert_eq!(comment["content"], "재밌어요!");
    assert_eq!(comment["author_name"], "익명");
    assert_eq!(comment["parent_comment_id"], serde_json::Value::Null);
    assert!(comment.get("owner_token").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_rejects_blank_content(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(BOB),
        json!({ "content": "  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_reply_to_missing_parent_returns_404(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(BOB),
        json!({ "content": "답글", "parent_comment_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_threading(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;

    let top = create_comment(
        &pool,
        ALICE,
        &webtoon_id,
        json!({ "content": "작가입니다", "author_name": "작가" }),
    )
    .await;
    create_comment(
        &pool,
        BOB,
        &webtoon_id,
        json!({ "content": "잘 보고 있어요", "parent_comment_id": top["id"] }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = common::get(
        app,
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(BOB),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["author_name"], "작가");
    assert_eq!(threads[0]["is_owner"], false);

    let replies = threads[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["content"], "잘 보고 있어요");
    // Bob is asking, Bob wrote the reply.
    assert_eq!(replies[0]["is_owner"], true);
    assert_eq!(replies[0]["replies"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_level_comments_are_newest_first(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;

    create_comment(&pool, BOB, &webtoon_id, json!({ "content": "먼저" })).await;
    create_comment(&pool, BOB, &webtoon_id, json!({ "content": "나중에" })).await;

    let app = common::build_test_app(pool);
    let response = common::get(
        app,
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(BOB),
    )
    .await;
    let body = common::body_json(response).await;
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads[0]["content"], "나중에");
    assert_eq!(threads[1]["content"], "먼저");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_update_guarded_by_author(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;
    let comment = create_comment(&pool, ALICE, &webtoon_id, json!({ "content": "원문" })).await;
    let uri = format!("/api/v1/comments/{}", comment["id"].as_str().unwrap());

    // The webtoon owner token does not matter here, only the comment author's.
    let response = common::put_json(
        common::build_test_app(pool.clone()),
        &uri,
        Some(BOB),
        json!({ "content": "수정 시도" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::put_json(
        common::build_test_app(pool),
        &uri,
        Some(ALICE),
        json!({ "content": "수정됨" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["content"], "수정됨");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_delete_cascades_replies(pool: PgPool) {
    let webtoon_id = create_webtoon(&pool, ALICE, "Discussed").await;
    let top = create_comment(&pool, ALICE, &webtoon_id, json!({ "content": "본문" })).await;
    create_comment(
        &pool,
        BOB,
        &webtoon_id,
        json!({ "content": "답글", "parent_comment_id": top["id"] }),
    )
    .await;

    let uri = format!("/api/v1/comments/{}", top["id"].as_str().unwrap());
    let response = common::delete(common::build_test_app(pool.clone()), &uri, Some(ALICE)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get(
        common::build_test_app(pool),
        &format!("/api/v1/webtoons/{webtoon_id}/comments"),
        Some(BOB),
    )
    .await;
    let body = common::body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
