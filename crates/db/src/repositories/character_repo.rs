//! Repository for the `characters` table.

use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, webtoon_id, name, description, appearance, personality, \
    role, image_url, created_at, updated_at";

/// Provides CRUD operations for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character under `webtoon_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        webtoon_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                (webtoon_id, name, description, appearance, personality, role, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(webtoon_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.appearance)
            .bind(&input.personality)
            .bind(&input.role)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all characters of a webtoon, ordered by creation time ascending.
    pub async fn list_by_webtoon(
        pool: &PgPool,
        webtoon_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE webtoon_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(webtoon_id)
            .fetch_all(pool)
            .await
    }

    /// The character who speaks for a webtoon in chat: the one whose role
    /// equals `role`, else the oldest character, else `None`.
    pub async fn reply_speaker(
        pool: &PgPool,
        webtoon_id: DbId,
        role: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE webtoon_id = $1
             ORDER BY COALESCE(role = $2, FALSE) DESC, created_at ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(webtoon_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// The webtoon a character belongs to: `(webtoon_id, owner_token)`.
    /// Used for transitive ownership checks.
    pub async fn owning_webtoon(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Option<(DbId, Option<String>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<String>)>(
            "SELECT w.id, w.owner_token FROM characters c
             JOIN webtoons w ON w.id = c.webtoon_id
             WHERE c.id = $1",
        )
        .bind(character_id)
        .fetch_optional(pool)
        .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                appearance = COALESCE($4, appearance),
                personality = COALESCE($5, personality),
                role = COALESCE($6, role),
                image_url = COALESCE($7, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.appearance)
            .bind(&input.personality)
            .bind(&input.role)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character by ID. Chat messages that reference it keep their
    /// text; their `character_id` is set to NULL in the database.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
