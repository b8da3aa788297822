use axum::routing::get;
use axum::Router;

use crate::handlers::like;
use crate::state::AppState;

/// Routes mounted at `/likes`.
///
/// ```text
/// GET /my  list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/my", get(like::list_mine))
}
