use axum::routing::put;
use axum::Router;

use crate::handlers::dialogue;
use crate::state::AppState;

/// Routes mounted at `/dialogues`.
///
/// ```text
/// PUT    /{id}  update
/// DELETE /{id}  delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(dialogue::update).delete(dialogue::delete))
}
