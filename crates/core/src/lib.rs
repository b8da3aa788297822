//! Domain primitives shared across the workspace: type aliases, the error
//! taxonomy, anonymous session tokens, the scripted chat reply engine, and
//! validation/pagination helpers.

pub mod chat;
pub mod error;
pub mod pagination;
pub mod session;
pub mod types;
pub mod validation;

pub use error::CoreError;
