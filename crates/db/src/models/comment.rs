//! Comment entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table. Comments nest one level: a comment with
/// a `parent_comment_id` is a reply and cannot itself be replied to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub webtoon_id: DbId,
    pub scene_id: Option<DbId>,
    pub parent_comment_id: Option<DbId>,
    pub author_name: String,
    pub content: String,
    /// Session token of the commenting visitor.
    #[serde(skip_serializing)]
    pub owner_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment annotated for the calling session, with its replies nested.
/// Replies carry an empty `replies` list.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub is_owner: bool,
    pub replies: Vec<CommentThread>,
}

/// DTO for creating a comment. The webtoon comes from the URL; the owner
/// token comes from the caller's session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
    /// Defaults to `'익명'` if omitted.
    pub author_name: Option<String>,
    pub scene_id: Option<DbId>,
    pub parent_comment_id: Option<DbId>,
}

/// DTO for editing a comment. Only the text may change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}
