//! Repository for the `webtoons` table.

use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::webtoon::{CreateWebtoon, UpdateWebtoon, Webtoon};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, summary, description, thumbnail_url, author_name, \
    genre, theme, story_style, number_of_cuts, status, view_count, like_count, \
    owner_token, created_at, updated_at";

/// Visibility filter shared by the public listing queries: published
/// webtoons plus everything the caller owns.
const VISIBLE: &str = "(status = 'published' OR owner_token = $1) \
    AND ($2::text IS NULL OR status = $2) \
    AND ($3::text IS NULL OR genre = $3)";

/// Provides CRUD operations for webtoons.
pub struct WebtoonRepo;

impl WebtoonRepo {
    /// Insert a new webtoon owned by `owner_token`, returning the created
    /// row. Status is always `'published'`; `author_name` defaults to
    /// `'Anonymous'`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWebtoon,
        owner_token: &str,
    ) -> Result<Webtoon, sqlx::Error> {
        let query = format!(
            "INSERT INTO webtoons
                (title, summary, description, thumbnail_url, author_name,
                 genre, theme, story_style, number_of_cuts, status, owner_token)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'Anonymous'),
                     $6, $7, $8, $9, 'published', $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.author_name)
            .bind(&input.genre)
            .bind(&input.theme)
            .bind(&input.story_style)
            .bind(input.number_of_cuts)
            .bind(owner_token)
            .fetch_one(pool)
            .await
    }

    /// Find a webtoon by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Webtoon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM webtoons WHERE id = $1");
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bump the view counter and return the fresh row. The increment is a
    /// single UPDATE so concurrent reads never lose counts.
    pub async fn increment_view_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Webtoon>, sqlx::Error> {
        let query = format!(
            "UPDATE webtoons SET view_count = view_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List webtoons visible to `caller_token` in insertion order, optionally
    /// filtered by status and genre.
    pub async fn list_visible(
        pool: &PgPool,
        caller_token: &str,
        status: Option<&str>,
        genre: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Webtoon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webtoons
             WHERE {VISIBLE}
             ORDER BY created_at ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(caller_token)
            .bind(status)
            .bind(genre)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the rows [`Self::list_visible`] would return without pagination.
    pub async fn count_visible(
        pool: &PgPool,
        caller_token: &str,
        status: Option<&str>,
        genre: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM webtoons WHERE {VISIBLE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(caller_token)
            .bind(status)
            .bind(genre)
            .fetch_one(pool)
            .await
    }

    /// List the webtoons owned by `owner_token` in insertion order.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_token: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Webtoon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webtoons
             WHERE owner_token = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(owner_token)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the webtoons owned by `owner_token`.
    pub async fn count_by_owner(pool: &PgPool, owner_token: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM webtoons WHERE owner_token = $1")
            .bind(owner_token)
            .fetch_one(pool)
            .await
    }

    /// Update a webtoon. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWebtoon,
    ) -> Result<Option<Webtoon>, sqlx::Error> {
        let query = format!(
            "UPDATE webtoons SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                description = COALESCE($4, description),
                thumbnail_url = COALESCE($5, thumbnail_url),
                author_name = COALESCE($6, author_name),
                genre = COALESCE($7, genre),
                theme = COALESCE($8, theme),
                story_style = COALESCE($9, story_style),
                number_of_cuts = COALESCE($10, number_of_cuts),
                status = COALESCE($11, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Webtoon>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.thumbnail_url)
            .bind(&input.author_name)
            .bind(&input.genre)
            .bind(&input.theme)
            .bind(&input.story_style)
            .bind(input.number_of_cuts)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a webtoon by ID. Scenes, dialogues, characters, comments,
    /// likes and chat messages cascade in the database.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM webtoons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
