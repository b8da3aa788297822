use axum::routing::{delete, post, put};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`. Sending and listing live under the
/// owning webtoon; read state and deletion address messages by id.
///
/// ```text
/// PUT    /messages/{id}/read   mark_read
/// POST   /messages/batch-read  mark_read_batch
/// DELETE /messages/{id}        delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/batch-read", post(chat::mark_read_batch))
        .route("/messages/{id}/read", put(chat::mark_read))
        .route("/messages/{id}", delete(chat::delete))
}
