//! Handlers for the webtoon chat feature.
//!
//! Visitors talk to a webtoon's protagonist. Storing a user message
//! synchronously stores a scripted character reply parented to it; the
//! reply text comes from the keyword engine in `gltr_core::chat`, and the
//! speaking character is the one whose role marks the protagonist, falling
//! back to the webtoon's oldest character.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gltr_core::chat;
use gltr_core::error::CoreError;
use gltr_core::pagination::{
    clamp_limit, clamp_offset, DEFAULT_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT,
};
use gltr_core::types::DbId;
use gltr_core::validation;
use gltr_db::models::chat_message::{ChatMessageThread, CreateChatMessage, NewChatMessage};
use gltr_db::repositories::{CharacterRepo, ChatMessageRepo, WebtoonRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_owner;
use crate::middleware::session::{RequiredSession, Session};
use crate::query::LimitOffsetParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/messages/batch-read`.
#[derive(Debug, Deserialize)]
pub struct BatchReadRequest {
    pub message_ids: Vec<DbId>,
}

/// Response payload for batch mark-read.
#[derive(Debug, Serialize)]
pub struct BatchReadResult {
    pub marked_read: u64,
}

/// Response payload for the unread counter.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_count: i64,
}

// ---------------------------------------------------------------------------
// Sending and listing (webtoon-scoped)
// ---------------------------------------------------------------------------

/// POST /api/v1/webtoons/{id}/chat/messages
///
/// Store the caller's message; when it is a user message, store the scripted
/// character reply with it in one transaction. The response carries the
/// stored user message (clients fetch the conversation for the reply).
pub async fn send_message(
    Session(token): Session,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Json(input): Json<CreateChatMessage>,
) -> AppResult<impl IntoResponse> {
    validation::validate_not_blank("message", &input.message)?;
    validation::validate_text_length(
        "sender_name",
        input.sender_name.as_deref(),
        validation::MAX_NAME_CHARS,
    )?;
    let sender_type = input
        .sender_type
        .as_deref()
        .unwrap_or(chat::SENDER_TYPE_USER);
    if sender_type != chat::SENDER_TYPE_USER && sender_type != chat::SENDER_TYPE_CHARACTER {
        return Err(AppError::Core(CoreError::Validation(format!(
            "sender_type must be one of: {}, {}",
            chat::SENDER_TYPE_USER,
            chat::SENDER_TYPE_CHARACTER
        ))));
    }

    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;

    let message = NewChatMessage {
        webtoon_id,
        scene_id: input.scene_id,
        character_id: None,
        sender_type: sender_type.to_string(),
        sender_name: input.sender_name.clone(),
        message: input.message.clone(),
        sender_token: Some(token),
        is_read: true,
    };

    // Only user messages draw a scripted reply.
    let stored = if sender_type == chat::SENDER_TYPE_USER {
        let speaker = CharacterRepo::reply_speaker(&state.pool, webtoon_id, chat::PROTAGONIST_ROLE)
            .await?;
        let reply = NewChatMessage {
            webtoon_id,
            scene_id: input.scene_id,
            character_id: speaker.as_ref().map(|c| c.id),
            sender_type: chat::SENDER_TYPE_CHARACTER.to_string(),
            sender_name: Some(
                speaker
                    .map(|c| c.name)
                    .unwrap_or_else(|| chat::FALLBACK_SENDER_NAME.to_string()),
            ),
            message: chat::generate_reply(&input.message).to_string(),
            sender_token: Some(chat::SYSTEM_SENDER_TOKEN.to_string()),
            is_read: false,
        };
        let (user_message, _reply) =
            ChatMessageRepo::create_pair(&state.pool, &message, &reply).await?;
        user_message
    } else {
        ChatMessageRepo::create(&state.pool, &message).await?
    };

    tracing::info!(
        message_id = %stored.id,
        webtoon_id = %webtoon_id,
        sender_type = %stored.sender_type,
        "Chat message stored",
    );

    let thread = ChatMessageThread {
        message: stored,
        character: None,
        is_owner: true,
        replies: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: thread })))
}

/// GET /api/v1/webtoons/{id}/chat/messages
///
/// The newest `limit` top-level messages (after `offset`), oldest first,
/// replies nested, speaking characters embedded.
pub async fn list_messages(
    Session(token): Session,
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
    Query(params): Query<LimitOffsetParams>,
) -> AppResult<impl IntoResponse> {
    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;

    let limit = clamp_limit(params.limit, DEFAULT_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let threads =
        ChatMessageRepo::list_threads(&state.pool, webtoon_id, &token, limit, offset).await?;
    Ok(Json(DataResponse { data: threads }))
}

/// GET /api/v1/webtoons/{id}/chat/unread-count
///
/// Unread character messages of a webtoon.
pub async fn unread_count(
    State(state): State<AppState>,
    Path(webtoon_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    WebtoonRepo::find_by_id(&state.pool, webtoon_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Webtoon",
            id: webtoon_id,
        }))?;

    let count = ChatMessageRepo::unread_count(&state.pool, webtoon_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount {
            unread_count: count,
        },
    }))
}

// ---------------------------------------------------------------------------
// Read state and deletion
// ---------------------------------------------------------------------------

/// PUT /api/v1/chat/messages/{id}/read
pub async fn mark_read(
    RequiredSession(_token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ChatMessageRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChatMessage",
            id,
        }))?;
    Ok(Json(DataResponse { data: message }))
}

/// POST /api/v1/chat/messages/batch-read
///
/// Mark several messages read at once; ids that do not exist are skipped.
/// Returns how many rows changed.
pub async fn mark_read_batch(
    RequiredSession(_token): RequiredSession,
    State(state): State<AppState>,
    Json(input): Json<BatchReadRequest>,
) -> AppResult<impl IntoResponse> {
    if input.message_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message_ids must not be empty".to_string(),
        )));
    }

    let marked_read = ChatMessageRepo::mark_read_batch(&state.pool, &input.message_ids).await?;
    Ok(Json(DataResponse {
        data: BatchReadResult { marked_read },
    }))
}

/// DELETE /api/v1/chat/messages/{id}
///
/// Webtoon owner only. Replies cascade in the database.
pub async fn delete(
    RequiredSession(token): RequiredSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (_, owner_token) = ChatMessageRepo::owning_webtoon(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChatMessage",
            id,
        }))?;
    ensure_owner(&token, owner_token.as_deref())?;

    ChatMessageRepo::delete(&state.pool, id).await?;
    tracing::info!(message_id = %id, "Chat message deleted");

    Ok(StatusCode::NO_CONTENT)
}
