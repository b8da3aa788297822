//! Repository for the `likes` table.

use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::like::{Like, LikeToggle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, webtoon_id, session_token, created_at, updated_at";

/// Provides like toggling and lookups.
pub struct LikeRepo;

impl LikeRepo {
    /// Flip the like state of `(webtoon_id, session_token)` and adjust the
    /// webtoon's `like_count` in the same transaction. The count never drops
    /// below zero.
    pub async fn toggle(
        pool: &PgPool,
        webtoon_id: DbId,
        session_token: &str,
    ) -> Result<LikeToggle, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM likes WHERE webtoon_id = $1 AND session_token = $2",
        )
        .bind(webtoon_id)
        .bind(session_token)
        .fetch_optional(&mut *tx)
        .await?;

        let toggle = match existing {
            Some(like_id) => {
                sqlx::query("DELETE FROM likes WHERE id = $1")
                    .bind(like_id)
                    .execute(&mut *tx)
                    .await?;
                let like_count = sqlx::query_scalar::<_, i32>(
                    "UPDATE webtoons SET like_count = GREATEST(like_count - 1, 0)
                     WHERE id = $1
                     RETURNING like_count",
                )
                .bind(webtoon_id)
                .fetch_one(&mut *tx)
                .await?;
                LikeToggle {
                    liked: false,
                    like_count,
                }
            }
            None => {
                sqlx::query("INSERT INTO likes (webtoon_id, session_token) VALUES ($1, $2)")
                    .bind(webtoon_id)
                    .bind(session_token)
                    .execute(&mut *tx)
                    .await?;
                let like_count = sqlx::query_scalar::<_, i32>(
                    "UPDATE webtoons SET like_count = like_count + 1
                     WHERE id = $1
                     RETURNING like_count",
                )
                .bind(webtoon_id)
                .fetch_one(&mut *tx)
                .await?;
                LikeToggle {
                    liked: true,
                    like_count,
                }
            }
        };

        tx.commit().await?;
        Ok(toggle)
    }

    /// Whether `session_token` currently likes `webtoon_id`.
    pub async fn exists(
        pool: &PgPool,
        webtoon_id: DbId,
        session_token: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE webtoon_id = $1 AND session_token = $2)",
        )
        .bind(webtoon_id)
        .bind(session_token)
        .fetch_one(pool)
        .await
    }

    /// Of the given webtoons, the ones `session_token` likes.
    pub async fn liked_webtoon_ids(
        pool: &PgPool,
        session_token: &str,
        webtoon_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT webtoon_id FROM likes
             WHERE session_token = $1 AND webtoon_id = ANY($2)",
        )
        .bind(session_token)
        .bind(webtoon_ids)
        .fetch_all(pool)
        .await
    }

    /// List all likes of a session in insertion order.
    pub async fn list_by_session(
        pool: &PgPool,
        session_token: &str,
    ) -> Result<Vec<Like>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM likes
             WHERE session_token = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Like>(&query)
            .bind(session_token)
            .fetch_all(pool)
            .await
    }
}
