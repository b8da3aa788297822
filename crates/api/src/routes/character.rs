use axum::routing::put;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// PUT    /{id}  update
/// DELETE /{id}  delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(character::update).delete(character::delete))
}
