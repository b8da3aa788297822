//! Handlers for the `/scenes` resource.
//!
//! Scene creation and listing are nested under `/webtoons/{id}/scenes`;
//! single-scene operations live at `/scenes/{id}`. Mutations are guarded by
//! the owning webtoon's token, and every update appends an edit-history row
//! in the same transaction as the patch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::types::DbId;
use gltr_core::validation;
use gltr_db::models::scene::{CreateScene, UpdateScene};
use gltr_db::repositories::{EditHistoryRepo, SceneRepo, WebtoonRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::RequiredSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateScene) -> Result<(), CoreError> {
    validation::validate_scene_number(input.scene_number)?;
    validation::validate_text_length(
        "image_url",
        input.image_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    validation::validate_text_length(
        "panel_layout",
        input.panel_layout.as_deref(),
        validation::MAX_PANEL_LAYOUT_CHARS,
    )?;
    if let Some(positions) = &input.character_positions {
        validation::validate_character_positions(positions)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateScene) -> Result<(), CoreError> {
    validation::validate_text_length(
        "image_url",
        input.image_url.as_deref(),
        validation::MAX_URL_CHARS,
    )?;
    validation::validate_text_length(
        "panel_layout",
        input.panel_layout.as_deref(),
        validation::MAX_PANEL_LAYOUT_CHARS,
    )?;
    if let Some(positions) = &input.character_positions {
        validation::validate_character_positions(positions)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Creation and listing (webtoon-scoped)
// ---------------------------------------------------------------------------

/// POST /api/v1/webtoons/{id}/scenes
///
/// Webtoon owner only. A duplicate scene_number within the webtoon is
/// rejected by the unique constraint and surfaces as 409.
pub async fn create(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Json(input): Json<CreateScene>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let webtoon = WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;
    ensure_owner(&token, webtoon.owner_token.as_deref())?;

    let scene = SceneRepo::create(&state.pool, webtoon_id, &input).await?;
    tracing::info!(
        scene_id = %scene.id,
        webtoon_id = %webtoon_id,
        scene_number = scene.scene_number,
        "Scene created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: scene })))
}

/// POST /api/v1/webtoons/{id}/scenes/batch
///
/// Webtoon owner only. All scenes are inserted in one transaction; any
/// failure rolls back the whole batch.
pub async fn create_batch(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Json(inputs): Json<Vec<CreateScene>>,
) -> AppResult<impl IntoResponse> {
    let numbers: Vec<i32> = inputs.iter().map(|s| s.scene_number).collect();
    validation::validate_scene_batch(&numbers)?;
    for input in &inputs {
        validate_create(input)?;
    }

    let webtoon = WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;
    ensure_owner(&token, webtoon.owner_token.as_deref())?;

    let scenes = SceneRepo::create_batch(&state.pool, webtoon_id, &inputs).await?;
    tracing::info!(
        webtoon_id = %webtoon_id,
        count = scenes.len(),
        "Scene batch created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: scenes })))
}

/// GET /api/v1/webtoons/{id}/scenes
///
/// Scenes ordered by scene_number, each with its dialogues.
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

    let scenes = SceneRepo::list_by_webtoon_with_dialogues(&state.pool, webtoon_id).await?;
    Ok(Json(DataResponse { data: scenes }))
}

// ---------------------------------------------------------------------------
// Single-scene operations
// ---------------------------------------------------------------------------

/// GET /api/v1/scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::find_by_id_with_dialogues(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    Ok(Json(DataResponse { data: scene }))
}

/// PUT /api/v1/scenes/{id}
///
/// Sparse patch, webtoon owner only. The pre-update values of the patched
/// fields and the patch itself land in the edit history atomically with
/// the update.
pub async fn update(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let (_, owner_token) = SceneRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    let scene = SceneRepo::update_with_history(&state.pool, id, &token, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    tracing::info!(scene_id = %scene.id, "Scene updated");

    Ok(Json(DataResponse { data: scene }))
}

/// DELETE /api/v1/scenes/{id}
///
/// Webtoon owner only. Dialogues and edit history cascade in the database.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (_, owner_token) = SceneRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    SceneRepo::delete(&state.pool, id).await?;
    tracing::info!(scene_id = %id, "Scene deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/scenes/{id}/history
///
/// The scene's edit history, newest first.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SceneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;

    let entries = EditHistoryRepo::list_by_scene(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}
