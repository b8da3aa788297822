//! Webtoon entity model and DTOs.

use gltr_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `webtoons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Webtoon {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: String,
    // -- Story shape --
    pub genre: Option<String>,
    pub theme: Option<String>,
    pub story_style: Option<String>,
    pub number_of_cuts: Option<i32>,
    pub status: String,
    // -- Reader counters --
    pub view_count: i32,
    pub like_count: i32,
    /// Session token of the creating visitor.
    #[serde(skip_serializing)]
    pub owner_token: Option<String>,
    // -- Timestamps --
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A webtoon annotated with flags relative to the calling session.
#[derive(Debug, Clone, Serialize)]
pub struct WebtoonWithFlags {
    #[serde(flatten)]
    pub webtoon: Webtoon,
    pub is_owner: bool,
    pub is_liked: bool,
}

/// DTO for creating a new webtoon. Status is always forced to `published`;
/// the owner token comes from the caller's session, never the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebtoon {
    pub title: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Defaults to `'Anonymous'` if omitted.
    pub author_name: Option<String>,
    pub genre: Option<String>,
    pub theme: Option<String>,
    pub story_style: Option<String>,
    pub number_of_cuts: Option<i32>,
}

/// DTO for updating an existing webtoon. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWebtoon {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: Option<String>,
    pub genre: Option<String>,
    pub theme: Option<String>,
    pub story_style: Option<String>,
    pub number_of_cuts: Option<i32>,
    pub status: Option<String>,
}
