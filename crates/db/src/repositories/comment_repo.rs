//! Repository for the `comments` table.

use std::collections::HashMap;

use gltr_core::session;
use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentThread, CreateComment, UpdateComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, webtoon_id, scene_id, parent_comment_id, author_name, \
    content, owner_token, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment owned by `owner_token`, returning the created
    /// row. `author_name` defaults to `'익명'`.
    pub async fn create(
        pool: &PgPool,
        webtoon_id: DbId,
        input: &CreateComment,
        owner_token: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments
                (webtoon_id, scene_id, parent_comment_id, author_name, content, owner_token)
             VALUES ($1, $2, $3, COALESCE($4, '익명'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(webtoon_id)
            .bind(input.scene_id)
            .bind(input.parent_comment_id)
            .bind(&input.author_name)
            .bind(&input.content)
            .bind(owner_token)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Threaded comment listing for a webtoon: top-level comments newest
    /// first, each carrying its replies oldest first, every node annotated
    /// with `is_owner` for the calling session.
    pub async fn list_threads(
        pool: &PgPool,
        webtoon_id: DbId,
        caller_token: &str,
    ) -> Result<Vec<CommentThread>, sqlx::Error> {
        let top_query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE webtoon_id = $1 AND parent_comment_id IS NULL
             ORDER BY created_at DESC"
        );
        let top = sqlx::query_as::<_, Comment>(&top_query)
            .bind(webtoon_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = top.iter().map(|c| c.id).collect();
        let reply_query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE parent_comment_id = ANY($1)
             ORDER BY created_at ASC"
        );
        let replies = sqlx::query_as::<_, Comment>(&reply_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<CommentThread>> = HashMap::new();
        for reply in replies {
            let Some(parent_id) = reply.parent_comment_id else {
                continue;
            };
            let is_owner = session::is_owner(caller_token, reply.owner_token.as_deref());
            grouped.entry(parent_id).or_default().push(CommentThread {
                comment: reply,
                is_owner,
                replies: Vec::new(),
            });
        }

        Ok(top
            .into_iter()
            .map(|comment| {
                let is_owner = session::is_owner(caller_token, comment.owner_token.as_deref());
                let replies = grouped.remove(&comment.id).unwrap_or_default();
                CommentThread {
                    comment,
                    is_owner,
                    replies,
                }
            })
            .collect())
    }

    /// Replace a comment's text, returning the fresh row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET content = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment by ID. Replies cascade in the database.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
