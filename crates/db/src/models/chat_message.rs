//! Chat message entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::character::Character;

/// A row from the `chat_messages` table. Messages nest one level: a scripted
/// character reply points at the user message it answers via
/// `parent_message_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub webtoon_id: DbId,
    pub scene_id: Option<DbId>,
    pub character_id: Option<DbId>,
    pub parent_message_id: Option<DbId>,
    /// `user` or `character`.
    pub sender_type: String,
    pub sender_name: Option<String>,
    pub message: String,
    /// Session token of the sender, or `ai_system` for scripted replies.
    #[serde(skip_serializing)]
    pub sender_token: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A chat message annotated for the calling session, with the speaking
/// character and replies embedded. Replies carry an empty `replies` list.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageThread {
    #[serde(flatten)]
    pub message: ChatMessage,
    pub character: Option<Character>,
    pub is_owner: bool,
    pub replies: Vec<ChatMessageThread>,
}

/// DTO for sending a message. The webtoon comes from the URL; the sender
/// token comes from the caller's session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatMessage {
    pub message: String,
    /// Defaults to `user` if omitted.
    pub sender_type: Option<String>,
    pub sender_name: Option<String>,
    pub scene_id: Option<DbId>,
}

/// An insert-ready message with every column resolved by the caller. Built
/// by the chat handler for both the user message and the scripted reply.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub webtoon_id: DbId,
    pub scene_id: Option<DbId>,
    pub character_id: Option<DbId>,
    pub sender_type: String,
    pub sender_name: Option<String>,
    pub message: String,
    pub sender_token: Option<String>,
    pub is_read: bool,
}
