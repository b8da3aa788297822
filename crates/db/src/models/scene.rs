//! Scene entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::dialogue::Dialogue;

/// A row from the `scenes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub webtoon_id: DbId,
    pub scene_number: i32,
    // -- Content --
    pub scene_description: Option<String>,
    pub image_url: Option<String>,
    pub narration: Option<String>,
    /// Free-form placement map, e.g. `{"hero": "left"}`.
    pub character_positions: Option<serde_json::Value>,
    pub panel_layout: Option<String>,
    // -- Timestamps --
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A scene enriched with its dialogue lines in reading order.
#[derive(Debug, Clone, Serialize)]
pub struct SceneWithDialogues {
    #[serde(flatten)]
    pub scene: Scene,
    pub dialogues: Vec<Dialogue>,
}

/// DTO for creating a new scene. The owning webtoon comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub scene_number: i32,
    pub scene_description: Option<String>,
    pub image_url: Option<String>,
    pub narration: Option<String>,
    pub character_positions: Option<serde_json::Value>,
    pub panel_layout: Option<String>,
}

/// DTO for updating an existing scene. All fields are optional; exactly the
/// fields present here are snapshotted into the edit history on update.
/// `scene_number` is fixed at creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub scene_description: Option<String>,
    pub image_url: Option<String>,
    pub narration: Option<String>,
    pub character_positions: Option<serde_json::Value>,
    pub panel_layout: Option<String>,
}
