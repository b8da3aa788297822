//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic page-based pagination parameters (`?page=&per_page=`).
///
/// Used by webtoon list endpoints. Values are clamped in the handler via
/// `clamp_page` / `clamp_limit` before they reach the repository layer.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for `GET /webtoons`: pagination plus optional filters.
#[derive(Debug, Deserialize)]
pub struct ListWebtoonsParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Filter by status (`draft`, `published`, `completed`).
    pub status: Option<String>,
    /// Filter by genre tag.
    pub genre: Option<String>,
}

/// Generic limit/offset parameters (`?limit=&offset=`).
///
/// Used by the chat message listing. Values are clamped in the handler via
/// `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct LimitOffsetParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
