//! Pagination defaults and clamping.
//!
//! Query parameters arrive as optional values; the helpers here turn them
//! into bounded concrete numbers before they reach any SQL.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default page number for page-based listings.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for webtoon listings.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Upper bound on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Default number of chat messages returned per request.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 50;

/// Upper bound on chat messages returned per request.
pub const MAX_MESSAGE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp an optional limit into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l < 1 => 1,
        Some(l) if l > max => max,
        Some(l) => l,
        None => default,
    }
}

/// Clamp an optional offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Clamp an optional page number to be at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Row offset for a 1-based page of `per_page` items.
pub fn offset_for(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(clamp_limit(None, DEFAULT_PER_PAGE, MAX_PER_PAGE), 20);
    }

    #[test]
    fn limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-5), 20, 100), 1);
    }

    #[test]
    fn limit_caps_at_max() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
    }

    #[test]
    fn limit_passes_in_range_values() {
        assert_eq!(clamp_limit(Some(42), 20, 100), 42);
    }

    #[test]
    fn offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(7)), 7);
    }

    #[test]
    fn page_floors_at_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(3)), 3);
    }

    #[test]
    fn offset_for_pages() {
        assert_eq!(offset_for(1, 20), 0);
        assert_eq!(offset_for(3, 20), 40);
    }
}
