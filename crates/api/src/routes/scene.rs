//! Route definitions for scene-scoped resources.
//!
//! These routes are mounted at `/scenes` once a scene id is known;
//! creation and listing live under the owning webtoon.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dialogue, scene};
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// GET    /{id}            get_by_id
/// PUT    /{id}            update
/// DELETE /{id}            delete
/// GET    /{id}/history    history
/// GET    /{id}/dialogues  list_by_scene
/// POST   /{id}/dialogues  create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(scene::get_by_id).put(scene::update).delete(scene::delete),
        )
        .route("/{id}/history", get(scene::history))
        .route(
            "/{id}/dialogues",
            get(dialogue::list_by_scene).post(dialogue::create),
        )
}
