//! Input validation for create/update payloads.
//!
//! Handlers call these before touching the store; every failure maps to a
//! 400 at the API boundary. Limits are measured in characters, not bytes.

use std::collections::HashSet;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest accepted webtoon title.
pub const MAX_TITLE_CHARS: usize = 200;

/// Longest accepted author or character name.
pub const MAX_NAME_CHARS: usize = 100;

/// Longest accepted genre tag.
pub const MAX_GENRE_CHARS: usize = 50;

/// Longest accepted theme or story-style tag.
pub const MAX_THEME_CHARS: usize = 100;

/// Longest accepted URL-ish reference string.
pub const MAX_URL_CHARS: usize = 500;

/// Longest accepted character role tag.
pub const MAX_ROLE_CHARS: usize = 50;

/// Longest accepted panel layout tag.
pub const MAX_PANEL_LAYOUT_CHARS: usize = 50;

/// Publication states a webtoon may be in.
pub const WEBTOON_STATUSES: &[&str] = &["draft", "published", "completed"];

/// Accepted `fact_or_fiction` tags on a dialogue line.
pub const FACT_TAGS: &[&str] = &["fact", "fiction"];

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// A required text field: non-blank and at most `max_chars` characters.
pub fn validate_required_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_text_length(field, Some(value), max_chars)
}

/// An optional text field: at most `max_chars` characters when present.
pub fn validate_text_length(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), CoreError> {
    if let Some(v) = value {
        if v.chars().count() > max_chars {
            return Err(CoreError::Validation(format!(
                "{field} must be at most {max_chars} characters"
            )));
        }
    }
    Ok(())
}

/// A required free-text field with no length cap: non-blank.
pub fn validate_not_blank(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Webtoon `status` must be one of [`WEBTOON_STATUSES`].
pub fn validate_webtoon_status(status: &str) -> Result<(), CoreError> {
    if !WEBTOON_STATUSES.contains(&status) {
        return Err(CoreError::Validation(format!(
            "status must be one of: {}",
            WEBTOON_STATUSES.join(", ")
        )));
    }
    Ok(())
}

/// Dialogue `fact_or_fiction` must be one of [`FACT_TAGS`].
pub fn validate_fact_tag(tag: &str) -> Result<(), CoreError> {
    if !FACT_TAGS.contains(&tag) {
        return Err(CoreError::Validation(format!(
            "fact_or_fiction must be one of: {}",
            FACT_TAGS.join(", ")
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Numeric and structured fields
// ---------------------------------------------------------------------------

/// Scene numbers are 1-based.
pub fn validate_scene_number(scene_number: i32) -> Result<(), CoreError> {
    if scene_number < 1 {
        return Err(CoreError::Validation(
            "scene_number must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Dialogue order within a scene is 1-based.
pub fn validate_dialogue_order(dialogue_order: i32) -> Result<(), CoreError> {
    if dialogue_order < 1 {
        return Err(CoreError::Validation(
            "dialogue_order must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Cut counts are positive when given.
pub fn validate_number_of_cuts(number_of_cuts: i32) -> Result<(), CoreError> {
    if number_of_cuts < 1 {
        return Err(CoreError::Validation(
            "number_of_cuts must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// `character_positions` is stored as JSONB and must be a JSON object.
pub fn validate_character_positions(value: &serde_json::Value) -> Result<(), CoreError> {
    if !value.is_object() {
        return Err(CoreError::Validation(
            "character_positions must be a JSON object".to_string(),
        ));
    }
    Ok(())
}

/// A scene batch must be non-empty and free of duplicate scene numbers.
/// Duplicates against already-stored scenes are left to the unique
/// constraint; this only catches collisions inside one payload.
pub fn validate_scene_batch(scene_numbers: &[i32]) -> Result<(), CoreError> {
    if scene_numbers.is_empty() {
        return Err(CoreError::Validation(
            "batch must contain at least one scene".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for n in scene_numbers {
        if !seen.insert(n) {
            return Err(CoreError::Conflict(format!(
                "Duplicate scene_number {n} in batch"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
