//! Handlers for the `/characters` resource.
//!
//! Characters are created and listed under `/webtoons/{id}/characters`;
//! single-character operations live at `/characters/{id}`. Ownership is
//! resolved transitively through the webtoon.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::types::DbId;
use gltr_core::validation;
use gltr_db::models::character::{CreateCharacter, UpdateCharacter};
use gltr_db::repositories::{CharacterRepo, WebtoonRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::RequiredSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateCharacter) -> Result<(), CoreError> {
    validation::validate_required_text("name", &input.name, validation::MAX_NAME_CHARS)?;
    validation::validate_text_length("role", input.role.as_deref(), validation::MAX_ROLE_CHARS)?;
    validation::validate_text_length(
        "image_url",
        input.image_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    Ok(())
}

fn validate_update(input: &UpdateCharacter) -> Result<(), CoreError> {
    if let Some(name) = input.name.as_deref() {
        validation::validate_required_text("name", name, validation::MAX_NAME_CHARS)?;
    }
    validation::validate_text_length("role", input.role.as_deref(), validation::MAX_ROLE_CHARS)?;
    validation::validate_text_length(
        "image_url",
        input.image_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/webtoons/{id}/characters
///
/// Webtoon owner only.
pub async fn create(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let webtoon = WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;
    ensure_owner(&token, webtoon.owner_token.as_deref())?;

    let character = CharacterRepo::create(&state.pool, webtoon_id, &input).await?;
    tracing::info!(
        character_id = %character.id,
        webtoon_id = %webtoon_id,
        name = %character.name,
        "Character created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// GET /api/v1/webtoons/{id}/characters
pub async fn list_by_webtoon(
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;

    let characters = CharacterRepo::list_by_webtoon(&state.pool, webtoon_id).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// PUT /api/v1/characters/{id}
///
/// Sparse patch, webtoon owner only.
pub async fn update(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let (_, owner_token) = CharacterRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    tracing::info!(character_id = %character.id, "Character updated");

    Ok(Json(DataResponse { data: character }))
}

/// DELETE /api/v1/characters/{id}
///
/// Webtoon owner only. Chat messages sent as this character keep their text;
/// their character reference is cleared in the database.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (_, owner_token) = CharacterRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    CharacterRepo::delete(&state.pool, id).await?;
    tracing::info!(character_id = %id, "Character deleted");

    Ok(StatusCode::NO_CONTENT)
}
