//! Like entity model.
//!
//! One row per (webtoon, session) pair, enforced by a unique constraint.
//! Likes are toggled, never created directly, so there are no DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `likes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub webtoon_id: DbId,
    /// Session token of the liking visitor.
    #[serde(skip_serializing)]
    pub session_token: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outcome of a like toggle: the new state and the webtoon's new count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: i32,
}
