//! Character entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `characters` table: a cast member of one webtoon.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub webtoon_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    /// Narrative role tag; `주인공` marks the protagonist who fronts chat.
    pub role: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character. The owning webtoon comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub description: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    pub role: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub appearance: Option<String>,
    pub personality: Option<String>,
    pub role: Option<String>,
    pub image_url: Option<String>,
}
