//! Repository for the `edit_history` table.
//!
//! The table is append-only. Inserts happen inside the scene-update
//! transaction (see `SceneRepo::update_with_history`), so the insert here
//! takes the open transaction rather than the pool.

use gltr_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::edit_history::EditHistory;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, scene_id, editor_token, edit_type, original_content, \
    edited_content, edit_command, created_at, updated_at";

/// Read and (transactional) append access to scene edit history.
pub struct EditHistoryRepo;

impl EditHistoryRepo {
    /// Append a history row within an open transaction.
    pub async fn insert_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        scene_id: DbId,
        editor_token: Option<&str>,
        edit_type: &str,
        original_content: &serde_json::Value,
        edited_content: &serde_json::Value,
        edit_command: Option<&str>,
    ) -> Result<EditHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO edit_history
                (scene_id, editor_token, edit_type, original_content,
                 edited_content, edit_command)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EditHistory>(&query)
            .bind(scene_id)
            .bind(editor_token)
            .bind(edit_type)
            .bind(original_content)
            .bind(edited_content)
            .bind(edit_command)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the history of a scene, newest first.
    pub async fn list_by_scene(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Vec<EditHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_history
             WHERE scene_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, EditHistory>(&query)
            .bind(scene_id)
            .fetch_all(pool)
            .await
    }
}
