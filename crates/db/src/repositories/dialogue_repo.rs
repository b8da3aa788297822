//! Repository for the `dialogues` table.

use std::collections::HashMap;

use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::dialogue::{CreateDialogue, Dialogue, UpdateDialogue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, scene_id, speaker, line, fact_or_fiction, dialogue_order, created_at, updated_at";

/// Provides CRUD operations for dialogue lines.
pub struct DialogueRepo;

impl DialogueRepo {
    /// Insert a new dialogue line under `scene_id`, returning the created
    /// row. `fact_or_fiction` defaults to `'fiction'`, `dialogue_order`
    /// to 1.
    pub async fn create(
        pool: &PgPool,
        scene_id: DbId,
        input: &CreateDialogue,
    ) -> Result<Dialogue, sqlx::Error> {
        let query = format!(
            "INSERT INTO dialogues
                (scene_id, speaker, line, fact_or_fiction, dialogue_order)
             VALUES ($1, $2, $3, COALESCE($4, 'fiction'), COALESCE($5, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dialogue>(&query)
            .bind(scene_id)
            .bind(&input.speaker)
            .bind(&input.line)
            .bind(&input.fact_or_fiction)
            .bind(input.dialogue_order)
            .fetch_one(pool)
            .await
    }

    /// Find a dialogue line by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dialogue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dialogues WHERE id = $1");
        sqlx::query_as::<_, Dialogue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all dialogue lines of a scene in reading order.
    pub async fn list_by_scene(pool: &PgPool, scene_id: DbId) -> Result<Vec<Dialogue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dialogues
             WHERE scene_id = $1
             ORDER BY dialogue_order ASC"
        );
        sqlx::query_as::<_, Dialogue>(&query)
            .bind(scene_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the dialogue lines of several scenes at once, grouped by scene,
    /// each group in reading order.
    pub async fn group_by_scene(
        pool: &PgPool,
        scene_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Dialogue>>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dialogues
             WHERE scene_id = ANY($1)
             ORDER BY dialogue_order ASC"
        );
        let rows = sqlx::query_as::<_, Dialogue>(&query)
            .bind(scene_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Dialogue>> = HashMap::new();
        for dialogue in rows {
            grouped.entry(dialogue.scene_id).or_default().push(dialogue);
        }
        Ok(grouped)
    }

    /// The webtoon a dialogue line belongs to: `(webtoon_id, owner_token)`.
    /// Used for transitive ownership checks.
    pub async fn owning_webtoon(
        pool: &PgPool,
        dialogue_id: DbId,
    ) -> Result<Option<(DbId, Option<String>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<String>)>(
            "SELECT w.id, w.owner_token FROM dialogues d
             JOIN scenes s ON s.id = d.scene_id
             JOIN webtoons w ON w.id = s.webtoon_id
             WHERE d.id = $1",
        )
        .bind(dialogue_id)
        .fetch_optional(pool)
        .await
    }

    /// Update a dialogue line. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDialogue,
    ) -> Result<Option<Dialogue>, sqlx::Error> {
        let query = format!(
            "UPDATE dialogues SET
                speaker = COALESCE($2, speaker),
                line = COALESCE($3, line),
                fact_or_fiction = COALESCE($4, fact_or_fiction),
                dialogue_order = COALESCE($5, dialogue_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dialogue>(&query)
            .bind(id)
            .bind(&input.speaker)
            .bind(&input.line)
            .bind(&input.fact_or_fiction)
            .bind(input.dialogue_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dialogue line by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dialogues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
