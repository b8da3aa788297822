//! Handlers for webtoon likes.
//!
//! A like is a (webtoon, session) pair toggled on and off; the webtoon's
//! `like_count` moves with it in the same transaction.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::types::DbId;
use gltr_db::repositories::{LikeRepo, WebtoonRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::session::{RequiredSession, Session};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/webtoons/{id}/like
///
/// Toggle: first call likes, second call unlikes. Returns the new `liked`
/// state and the webtoon's fresh `like_count`.
pub async fn toggle(
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

    let result = LikeRepo::toggle(&state.pool, webtoon_id, &token).await?;
    tracing::info!(
        webtoon_id = %webtoon_id,
        liked = result.liked,
        like_count = result.like_count,
        "Like toggled",
    );

    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/likes/my
///
/// The calling session's likes in insertion order.
pub async fn list_mine(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let likes = LikeRepo::list_by_session(&state.pool, &token).await?;
    Ok(Json(DataResponse { data: likes }))
}
