//! Dialogue entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `dialogues` table: one spoken line within a scene.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dialogue {
    pub id: DbId,
    pub scene_id: DbId,
    pub speaker: String,
    pub line: String,
    /// Whether the line states a fact or is fictional embellishment.
    pub fact_or_fiction: String,
    pub dialogue_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dialogue line. The owning scene comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDialogue {
    pub speaker: String,
    pub line: String,
    /// Defaults to `'fiction'` if omitted.
    pub fact_or_fiction: Option<String>,
    /// Defaults to 1 if omitted.
    pub dialogue_order: Option<i32>,
}

/// DTO for updating an existing dialogue line. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDialogue {
    pub speaker: Option<String>,
    pub line: Option<String>,
    pub fact_or_fiction: Option<String>,
    pub dialogue_order: Option<i32>,
}
