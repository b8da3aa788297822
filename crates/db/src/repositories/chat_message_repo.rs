//! Repository for the `chat_messages` table.

use std::collections::HashMap;

use gltr_core::session;
use gltr_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::Character;
use crate::models::chat_message::{ChatMessage, ChatMessageThread, NewChatMessage};
use crate::repositories::character_repo::CharacterRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, webtoon_id, scene_id, character_id, parent_message_id, \
    sender_type, sender_name, message, sender_token, is_read, created_at, updated_at";

/// Provides chat message storage and threaded reads.
pub struct ChatMessageRepo;

impl ChatMessageRepo {
    /// Insert a single top-level message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        message: &NewChatMessage,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = insert_query();
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(message.webtoon_id)
            .bind(message.scene_id)
            .bind(message.character_id)
            .bind(Option::<DbId>::None)
            .bind(&message.sender_type)
            .bind(&message.sender_name)
            .bind(&message.message)
            .bind(&message.sender_token)
            .bind(message.is_read)
            .fetch_one(pool)
            .await
    }

    /// Insert a user message and its scripted reply in one transaction. The
    /// reply is parented to the stored user message; both land or neither
    /// does.
    pub async fn create_pair(
        pool: &PgPool,
        user_message: &NewChatMessage,
        reply: &NewChatMessage,
    ) -> Result<(ChatMessage, ChatMessage), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = insert_query();
        let stored_user = sqlx::query_as::<_, ChatMessage>(&query)
            .bind(user_message.webtoon_id)
            .bind(user_message.scene_id)
            .bind(user_message.character_id)
            .bind(Option::<DbId>::None)
            .bind(&user_message.sender_type)
            .bind(&user_message.sender_name)
            .bind(&user_message.message)
            .bind(&user_message.sender_token)
            .bind(user_message.is_read)
            .fetch_one(&mut *tx)
            .await?;
        let stored_reply = sqlx::query_as::<_, ChatMessage>(&query)
            .bind(reply.webtoon_id)
            .bind(reply.scene_id)
            .bind(reply.character_id)
            .bind(Some(stored_user.id))
            .bind(&reply.sender_type)
            .bind(&reply.sender_name)
            .bind(&reply.message)
            .bind(&reply.sender_token)
            .bind(reply.is_read)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((stored_user, stored_reply))
    }

    /// Find a message by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ChatMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chat_messages WHERE id = $1");
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Threaded conversation of a webtoon: the newest `limit` top-level
    /// messages (after `offset`), returned oldest first, replies nested
    /// oldest first, speaking characters embedded, every node annotated
    /// with `is_owner` for the calling session.
    pub async fn list_threads(
        pool: &PgPool,
        webtoon_id: DbId,
        caller_token: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessageThread>, sqlx::Error> {
        let top_query = format!(
            "SELECT {COLUMNS} FROM chat_messages
             WHERE webtoon_id = $1 AND parent_message_id IS NULL
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let top = sqlx::query_as::<_, ChatMessage>(&top_query)
            .bind(webtoon_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = top.iter().map(|m| m.id).collect();
        let reply_query = format!(
            "SELECT {COLUMNS} FROM chat_messages
             WHERE parent_message_id = ANY($1)
             ORDER BY created_at ASC"
        );
        let replies = sqlx::query_as::<_, ChatMessage>(&reply_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let characters: HashMap<DbId, Character> = CharacterRepo::list_by_webtoon(pool, webtoon_id)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut grouped: HashMap<DbId, Vec<ChatMessageThread>> = HashMap::new();
        for reply in replies {
            let Some(parent_id) = reply.parent_message_id else {
                continue;
            };
            grouped
                .entry(parent_id)
                .or_default()
                .push(thread_node(reply, &characters, caller_token, Vec::new()));
        }

        // Page newest-first, then flip so the conversation reads downward.
        let mut threads: Vec<ChatMessageThread> = top
            .into_iter()
            .map(|message| {
                let replies = grouped.remove(&message.id).unwrap_or_default();
                thread_node(message, &characters, caller_token, replies)
            })
            .collect();
        threads.reverse();
        Ok(threads)
    }

    /// Mark one message read, returning the fresh row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<ChatMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE chat_messages SET is_read = TRUE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a batch of messages read. Returns how many rows changed.
    pub async fn mark_read_batch(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE chat_messages SET is_read = TRUE WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Unread scripted replies of a webtoon, across all sessions.
    pub async fn unread_count(pool: &PgPool, webtoon_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM chat_messages
             WHERE webtoon_id = $1 AND sender_type = 'character' AND is_read = FALSE",
        )
        .bind(webtoon_id)
        .fetch_one(pool)
        .await
    }

    /// The webtoon a message belongs to: `(webtoon_id, owner_token)`.
    /// Used for transitive ownership checks.
    pub async fn owning_webtoon(
        pool: &PgPool,
        message_id: DbId,
    ) -> Result<Option<(DbId, Option<String>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<String>)>(
            "SELECT w.id, w.owner_token FROM chat_messages m
             JOIN webtoons w ON w.id = m.webtoon_id
             WHERE m.id = $1",
        )
        .bind(message_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a message by ID. Replies cascade in the database.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn insert_query() -> String {
    format!(
        "INSERT INTO chat_messages
            (webtoon_id, scene_id, character_id, parent_message_id,
             sender_type, sender_name, message, sender_token, is_read)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING {COLUMNS}"
    )
}

fn thread_node(
    message: ChatMessage,
    characters: &HashMap<DbId, Character>,
    caller_token: &str,
    replies: Vec<ChatMessageThread>,
) -> ChatMessageThread {
    let character = message
        .character_id
        .and_then(|id| characters.get(&id).cloned());
    let is_owner = session::is_owner(caller_token, message.sender_token.as_deref());
    ChatMessageThread {
        message,
        character,
        is_owner,
        replies,
    }
}
