//! Handlers for the `/dialogues` resource.
//!
//! Dialogue lines are created and listed under `/scenes/{id}/dialogues`;
//! single-line operations live at `/dialogues/{id}`. Ownership is resolved
//! transitively through the scene's webtoon.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::error::CoreError;
use gltr_core::types::DbId;
use gltr_core::validation;
use gltr_db::models::dialogue::{CreateDialogue, UpdateDialogue};
use gltr_db::repositories::{DialogueRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::RequiredSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateDialogue) -> Result<(), CoreError> {
    validation::validate_required_text("speaker", &input.speaker, validation::MAX_NAME_CHARS)?;
    validation::validate_not_blank("line", &input.line)?;
    if let Some(tag) = input.fact_or_fiction.as_deref() {
        validation::validate_fact_tag(tag)?;
    }
    if let Some(order) = input.dialogue_order {
        validation::validate_dialogue_order(order)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateDialogue) -> Result<(), CoreError> {
    if let Some(speaker) = input.speaker.as_deref() {
        validation::validate_required_text("speaker", speaker, validation::MAX_NAME_CHARS)?;
    }
    if let Some(line) = input.line.as_deref() {
        validation::validate_not_blank("line", line)?;
    }
    if let Some(tag) = input.fact_or_fiction.as_deref() {
        validation::validate_fact_tag(tag)?;
    }
    if let Some(order) = input.dialogue_order {
        validation::validate_dialogue_order(order)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/scenes/{id}/dialogues
///
/// Webtoon owner only. A duplicate dialogue_order within the scene is
/// rejected by the unique constraint and surfaces as 409.
pub async fn create(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(scene_id): Path<DbId>,
    Json(input): Json<CreateDialogue>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let (_, owner_token) = SceneRepo::owning_webtoon(&state.pool, scene_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scene",
            id: scene_id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    let dialogue = DialogueRepo::create(&state.pool, scene_id, &input).await?;
    tracing::info!(
        dialogue_id = %dialogue.id,
        scene_id = %scene_id,
        "Dialogue created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: dialogue })))
}

/// GET /api/v1/scenes/{id}/dialogues
///
/// Dialogue lines in reading order.
pub async fn list_by_scene(
    State(state): State<AppState>,
    Path(scene_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SceneRepo::find_by_id(&state.pool, scene_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scene",
            id: scene_id,
        }))?;

    let dialogues = DialogueRepo::list_by_scene(&state.pool, scene_id).await?;
    Ok(Json(DataResponse { data: dialogues }))
}

/// PUT /api/v1/dialogues/{id}
///
/// Sparse patch, webtoon owner only.
pub async fn update(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDialogue>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let (_, owner_token) = DialogueRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dialogue",
            id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    let dialogue = DialogueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dialogue",
            id,
        }))?;
    tracing::info!(dialogue_id = %dialogue.id, "Dialogue updated");

    Ok(Json(DataResponse { data: dialogue }))
}

/// DELETE /api/v1/dialogues/{id}
///
/// Webtoon owner only.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (_, owner_token) = DialogueRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dialogue",
            id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    DialogueRepo::delete(&state.pool, id).await?;
    tracing::info!(dialogue_id = %id, "Dialogue deleted");

    Ok(StatusCode::NO_CONTENT)
}
