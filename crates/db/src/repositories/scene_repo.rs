//! Repository for the `scenes` table.

use gltr_core::types::DbId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::edit_history::EDIT_TYPE_MANUAL;
use crate::models::scene::{CreateScene, Scene, SceneWithDialogues, UpdateScene};
use crate::repositories::dialogue_repo::DialogueRepo;
use crate::repositories::edit_history_repo::EditHistoryRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, webtoon_id, scene_number, scene_description, image_url, \
    narration, character_positions, panel_layout, created_at, updated_at";

/// Provides CRUD operations for scenes, including the audited update that
/// pairs every patch with an edit-history row.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene under `webtoon_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        webtoon_id: DbId,
        input: &CreateScene,
    ) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes
                (webtoon_id, scene_number, scene_description, image_url,
                 narration, character_positions, panel_layout)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(webtoon_id)
            .bind(input.scene_number)
            .bind(&input.scene_description)
            .bind(&input.image_url)
            .bind(&input.narration)
            .bind(&input.character_positions)
            .bind(&input.panel_layout)
            .fetch_one(pool)
            .await
    }

    /// Insert several scenes under one webtoon in a single transaction.
    /// Any failure (typically a duplicate scene_number) rolls back the
    /// whole batch.
    pub async fn create_batch(
        pool: &PgPool,
        webtoon_id: DbId,
        inputs: &[CreateScene],
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO scenes
                (webtoon_id, scene_number, scene_description, image_url,
                 narration, character_positions, panel_layout)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let scene = sqlx::query_as::<_, Scene>(&query)
                .bind(webtoon_id)
                .bind(input.scene_number)
                .bind(&input.scene_description)
                .bind(&input.image_url)
                .bind(&input.narration)
                .bind(&input.character_positions)
                .bind(&input.panel_layout)
                .fetch_one(&mut *tx)
                .await?;
            created.push(scene);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a scene by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scene by ID, enriched with its dialogue lines.
    pub async fn find_by_id_with_dialogues(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SceneWithDialogues>, sqlx::Error> {
        let scene = Self::find_by_id(pool, id).await?;
        match scene {
            Some(scene) => {
                let dialogues = DialogueRepo::list_by_scene(pool, scene.id).await?;
                Ok(Some(SceneWithDialogues { scene, dialogues }))
            }
            None => Ok(None),
        }
    }

    /// List all scenes of a webtoon, ordered by scene_number ascending.
    pub async fn list_by_webtoon(
        pool: &PgPool,
        webtoon_id: DbId,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE webtoon_id = $1
             ORDER BY scene_number ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(webtoon_id)
            .fetch_all(pool)
            .await
    }

    /// List all scenes of a webtoon with their dialogue lines, ordered by
    /// scene_number ascending.
    pub async fn list_by_webtoon_with_dialogues(
        pool: &PgPool,
        webtoon_id: DbId,
    ) -> Result<Vec<SceneWithDialogues>, sqlx::Error> {
        let scenes = Self::list_by_webtoon(pool, webtoon_id).await?;
        let ids: Vec<DbId> = scenes.iter().map(|s| s.id).collect();
        let mut by_scene = DialogueRepo::group_by_scene(pool, &ids).await?;
        Ok(scenes
            .into_iter()
            .map(|scene| {
                let dialogues = by_scene.remove(&scene.id).unwrap_or_default();
                SceneWithDialogues { scene, dialogues }
            })
            .collect())
    }

    /// The webtoon a scene belongs to: `(webtoon_id, owner_token)`.
    /// Used for transitive ownership checks.
    pub async fn owning_webtoon(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Option<(DbId, Option<String>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<String>)>(
            "SELECT w.id, w.owner_token FROM scenes s
             JOIN webtoons w ON w.id = s.webtoon_id
             WHERE s.id = $1",
        )
        .bind(scene_id)
        .fetch_optional(pool)
        .await
    }

    /// Apply a sparse patch and append the matching edit-history row in one
    /// transaction; both land or neither does. The history row snapshots the
    /// pre-update values of exactly the patched fields and the patch itself.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_with_history(
        pool: &PgPool,
        id: DbId,
        editor_token: &str,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the row so the snapshot and the patch see the same state
        // under concurrent editors.
        let select = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Scene>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let (original_content, edited_content) = snapshot(&current, input);

        let update = format!(
            "UPDATE scenes SET
                scene_description = COALESCE($2, scene_description),
                image_url = COALESCE($3, image_url),
                narration = COALESCE($4, narration),
                character_positions = COALESCE($5, character_positions),
                panel_layout = COALESCE($6, panel_layout)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Scene>(&update)
            .bind(id)
            .bind(&input.scene_description)
            .bind(&input.image_url)
            .bind(&input.narration)
            .bind(&input.character_positions)
            .bind(&input.panel_layout)
            .fetch_one(&mut *tx)
            .await?;

        EditHistoryRepo::insert_in_tx(
            &mut tx,
            id,
            Some(editor_token),
            EDIT_TYPE_MANUAL,
            &original_content,
            &edited_content,
            None,
        )
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete a scene by ID. Dialogues and edit history cascade in the
    /// database. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Before/after JSON objects covering exactly the fields present in `input`.
fn snapshot(current: &Scene, input: &UpdateScene) -> (serde_json::Value, serde_json::Value) {
    let mut original = serde_json::Map::new();
    let mut edited = serde_json::Map::new();
    if let Some(v) = &input.scene_description {
        original.insert("scene_description".into(), json!(current.scene_description));
        edited.insert("scene_description".into(), json!(v));
    }
    if let Some(v) = &input.image_url {
        original.insert("image_url".into(), json!(current.image_url));
        edited.insert("image_url".into(), json!(v));
    }
    if let Some(v) = &input.narration {
        original.insert("narration".into(), json!(current.narration));
        edited.insert("narration".into(), json!(v));
    }
    if let Some(v) = &input.character_positions {
        original.insert(
            "character_positions".into(),
            json!(current.character_positions),
        );
        edited.insert("character_positions".into(), v.clone());
    }
    if let Some(v) = &input.panel_layout {
        original.insert("panel_layout".into(), json!(current.panel_layout));
        edited.insert("panel_layout".into(), json!(v));
    }
    (
        serde_json::Value::Object(original),
        serde_json::Value::Object(edited),
    )
}
