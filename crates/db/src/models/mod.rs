//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Session token columns never serialize; callers prove identity with the
//! cookie, and responses must not echo stored tokens.

pub mod character;
pub mod chat_message;
pub mod comment;
pub mod dialogue;
pub mod edit_history;
pub mod like;
pub mod scene;
pub mod webtoon;
