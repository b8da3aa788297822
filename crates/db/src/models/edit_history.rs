//! Edit-history entity model.
//!
//! Append-only audit trail of scene updates. Rows are written inside the
//! same transaction as the scene update they record; there is no create DTO
//! because nothing outside `SceneRepo::update_with_history` inserts them.

use gltr_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// `edit_type` recorded for hand-made edits through the API.
pub const EDIT_TYPE_MANUAL: &str = "manual";

/// A row from the `edit_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EditHistory {
    pub id: DbId,
    pub scene_id: DbId,
    /// Session token of the editor.
    #[serde(skip_serializing)]
    pub editor_token: Option<String>,
    pub edit_type: String,
    /// Pre-update values of exactly the fields the patch touched.
    pub original_content: Option<serde_json::Value>,
    /// The patch as submitted.
    pub edited_content: Option<serde_json::Value>,
    pub edit_command: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
