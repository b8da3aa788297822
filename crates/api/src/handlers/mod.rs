//! Request handlers for the webtoon platform resources.
//!
//! Each submodule provides async handler functions for a single resource
//! type. Handlers validate input via `gltr_core::validation`, resolve the
//! caller's identity through the session extractors, enforce ownership
//! before any mutation, and delegate persistence to the repositories in
//! `gltr_db`. Errors are mapped via [`AppError`](crate::error::AppError).

pub mod character;
pub mod chat;
pub mod comment;
pub mod dialogue;
pub mod like;
pub mod scene;
pub mod webtoon;

use gltr_core::error::CoreError;
use gltr_core::session;

use crate::error::AppError;

/// Turn a failed ownership check into a 403.
///
/// `owner_token` is the stored token of the resource itself, or of its
/// owning webtoon for transitively guarded resources. Callers resolve 404
/// first, so a `None` owner here means an ownerless resource, which no
/// session may mutate.
pub(crate) fn ensure_owner(caller_token: &str, owner_token: Option<&str>) -> Result<(), AppError> {
    if session::is_owner(caller_token, owner_token) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Session does not own this resource".into(),
        )))
    }
}
