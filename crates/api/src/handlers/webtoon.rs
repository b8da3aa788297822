//! Handlers for the `/webtoons` resource.
//!
//! Webtoons are the root aggregate: scenes, characters, comments, likes and
//! chat messages all hang off one. The session that creates a webtoon owns
//! it; every response annotates the entity with `is_owner` / `is_liked`
//! computed for the calling session, never stored.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::pagination::{clamp_limit, clamp_page, offset_for, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use gltr_core::types::DbId;
use gltr_core::{session, validation};
use gltr_db::models::webtoon::{CreateWebtoon, UpdateWebtoon, Webtoon, WebtoonWithFlags};
use gltr_db::repositories::{LikeRepo, WebtoonRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::{RequiredSession, Session};
use crate::query::{ListWebtoonsParams, PageParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateWebtoon) -> Result<(), CoreError> {
    validation::validate_required_text("title", &input.title, validation::MAX_TITLE_CHARS)?;
    validation::validate_text_length(
        "author_name",
        input.author_name.as_deref(),
        validation::MAX_NAME_CHARS,
    )?;
    validation::validate_text_length("genre", input.genre.as_deref(), validation::MAX_GENRE_CHARS)?;
    validation::validate_text_length("theme", input.theme.as_deref(), validation::MAX_THEME_CHARS)?;
    validation::validate_text_length(
        "story_style",
        input.story_style.as_deref(),
        validation::MAX_THEME_CHARS,
    )?;
    validation::validate_text_length(
        "thumbnail_url",
        input.thumbnail_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    if let Some(cuts) = input.number_of_cuts {
        validation::validate_number_of_cuts(cuts)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateWebtoon) -> Result<(), CoreError> {
    if let Some(title) = input.title.as_deref() {
        validation::validate_required_text("title", title, validation::MAX_TITLE_CHARS)?;
    }
    validation::validate_text_length(
        "author_name",
        input.author_name.as_deref(),
        validation::MAX_NAME_CHARS,
    )?;
    validation::validate_text_length("genre", input.genre.as_deref(), validation::MAX_GENRE_CHARS)?;
    validation::validate_text_length("theme", input.theme.as_deref(), validation::MAX_THEME_CHARS)?;
    validation::validate_text_length(
        "story_style",
        input.story_style.as_deref(),
        validation::MAX_THEME_CHARS,
    )?;
    validation::validate_text_length(
        "thumbnail_url",
        input.thumbnail_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    if let Some(cuts) = input.number_of_cuts {
        validation::validate_number_of_cuts(cuts)?;
    }
    if let Some(status) = input.status.as_deref() {
        validation::validate_webtoon_status(status)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Flag annotation
// ---------------------------------------------------------------------------

/// Annotate a page of webtoons with `is_owner` / `is_liked` for the caller.
/// Liked ids are fetched in one query for the whole page.
async fn annotate(
    pool: &PgPool,
    caller_token: &str,
    webtoons: Vec<Webtoon>,
) -> Result<Vec<WebtoonWithFlags>, sqlx::Error> {
    let ids: Vec<DbId> = webtoons.iter().map(|w| w.id).collect();
    let liked: HashSet<DbId> = LikeRepo::liked_webtoon_ids(pool, caller_token, &ids)
        .await?
        .into_iter()
        .collect();

    Ok(webtoons
        .into_iter()
        .map(|webtoon| {
            let is_owner = session::is_owner(caller_token, webtoon.owner_token.as_deref());
            let is_liked = liked.contains(&webtoon.id);
            WebtoonWithFlags {
                webtoon,
                is_owner,
                is_liked,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Webtoon CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/webtoons
///
/// The calling session becomes the owner. Status is always `published`.
pub async fn create(
    Session(token): Session,
    State(state): State<AppState>,
    Json(input): Json<CreateWebtoon>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let webtoon = WebtoonRepo::create(&state.pool, &input, &token).await?;
    tracing::info!(webtoon_id = %webtoon.id, title = %webtoon.title, "Webtoon created");

    let flagged = WebtoonWithFlags {
        webtoon,
        is_owner: true,
        is_liked: false,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: flagged })))
}

/// GET /api/v1/webtoons
///
/// Published webtoons plus the caller's own, in insertion order, optionally
/// filtered by `status` / `genre`, paginated with `page` / `per_page`.
pub async fn list(
    Session(token): Session,
    State(state): State<AppState>,
    Query(params): Query<ListWebtoonsParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        validation::validate_webtoon_status(status)?;
    }

    let page = clamp_page(params.page);
    let per_page = clamp_limit(params.per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE);
    let offset = offset_for(page, per_page);

    let status = params.status.as_deref();
    let genre = params.genre.as_deref();
    let webtoons =
        WebtoonRepo::list_visible(&state.pool, &token, status, genre, per_page, offset).await?;
    let total = WebtoonRepo::count_visible(&state.pool, &token, status, genre).await?;
    let data = annotate(&state.pool, &token, webtoons).await?;

    Ok(Json(PageResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// GET /api/v1/webtoons/my
///
/// All webtoons owned by the calling session regardless of status.
pub async fn list_mine(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(params.page);
    let per_page = clamp_limit(params.per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE);
    let offset = offset_for(page, per_page);

    let webtoons = WebtoonRepo::list_by_owner(&state.pool, &token, per_page, offset).await?;
    let total = WebtoonRepo::count_by_owner(&state.pool, &token).await?;
    let data = annotate(&state.pool, &token, webtoons).await?;

    Ok(Json(PageResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// GET /api/v1/webtoons/{id}
///
/// Every fetch counts as a view; the increment is atomic in the store.
pub async fn get_by_id(
    Session(token): Session,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let webtoon = WebtoonRepo::increment_view_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id,
        }))?;

    let is_owner = session::is_owner(&token, webtoon.owner_token.as_deref());
    let is_liked = LikeRepo::exists(&state.pool, webtoon.id, &token).await?;
    let flagged = WebtoonWithFlags {
        webtoon,
        is_owner,
        is_liked,
    };
    Ok(Json(DataResponse { data: flagged }))
}

/// PUT /api/v1/webtoons/{id}
///
/// Sparse patch; owner only.
pub async fn update(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWebtoon>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let existing = WebtoonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id,
        }))?;
    ensure_owner(&token, existing.owner_token.as_deref())?;

    let webtoon = WebtoonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id,
        }))?;
    tracing::info!(webtoon_id = %webtoon.id, "Webtoon updated");

    let is_liked = LikeRepo::exists(&state.pool, webtoon.id, &token).await?;
    let flagged = WebtoonWithFlags {
        webtoon,
        is_owner: true,
        is_liked,
    };
    Ok(Json(DataResponse { data: flagged }))
}

/// DELETE /api/v1/webtoons/{id}
///
/// Owner only. Scenes, dialogues, characters, comments, likes and chat
/// messages cascade in the database.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = WebtoonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id,
        }))?;
    ensure_owner(&token, existing.owner_token.as_deref())?;

    WebtoonRepo::delete(&state.pool, id).await?;
    tracing::info!(webtoon_id = %id, "Webtoon deleted");

    Ok(StatusCode::NO_CONTENT)
}
