//! Handlers for the `/comments` resource.
//!
//! Any visitor may comment on a webtoon (first contact mints their session);
//! editing and deleting are guarded by the comment's own owner token, not
//! the webtoon's.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::types::DbId;
use gltr_core::validation;
use gltr_db::models::comment::{CreateComment, UpdateComment};
use gltr_db::repositories::{CommentRepo, WebtoonRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::{RequiredSession, Session};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_create(input: &CreateComment) -> Result<(), CoreError> {
    validation::validate_not_blank("content", &input.content)?;
    validation::validate_text_length(
        "author_name",
        input.author_name.as_deref(),
        validation::MAX_NAME_CHARS,
    )?;
    Ok(())
}

/// POST /api/v1/webtoons/{id}/comments
///
/// The calling session becomes the comment's owner. `author_name` defaults
/// to `'익명'`.
pub async fn create(
    Session(token): Session,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;
    if let Some(parent_id) = input.parent_comment_id {
        CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: parent_id,
            }))?;
    }

    let comment = CommentRepo::create(&state.pool, webtoon_id, &input, &token).await?;
    tracing::info!(
        comment_id = %comment.id,
        webtoon_id = %webtoon_id,
        "Comment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/webtoons/{id}/comments
///
/// Top-level comments newest first, each with its replies oldest first,
/// every node flagged `is_owner` for the calling session.
pub async fn list_by_webtoon(
    Session(token): Session,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;

    let threads = CommentRepo::list_threads(&state.pool, webtoon_id, &token).await?;
    Ok(Json(DataResponse { data: threads }))
}

/// PUT /api/v1/comments/{id}
///
/// Comment owner only; only the content can change.
pub async fn update(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    validation::validate_not_blank("content", &input.content)?;

    let existing = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    ensure_owner(&token, existing.owner_token.as_deref())?;

    let comment = CommentRepo::update_content(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    tracing::info!(comment_id = %comment.id, "Comment updated");

    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/comments/{id}
///
/// Comment owner only. Replies cascade in the database.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    ensure_owner(&token, existing.owner_token.as_deref())?;

    CommentRepo::delete(&state.pool, id).await?;
    tracing::info!(comment_id = %id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}
