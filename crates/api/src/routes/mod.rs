pub mod character;
pub mod chat;
pub mod comment;
pub mod dialogue;
pub mod health;
pub mod like;
pub mod scene;
pub mod webtoon;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /webtoons                            list, create
/// /webtoons/my                         caller's webtoons (GET)
/// /webtoons/{id}                       get, update, delete
/// /webtoons/{id}/like                  toggle like (POST)
/// /webtoons/{id}/characters            list, create
/// /webtoons/{id}/comments              list, create
/// /webtoons/{id}/scenes                list, create
/// /webtoons/{id}/scenes/batch          batch create (POST)
/// /webtoons/{id}/chat/messages         list, send
/// /webtoons/{id}/chat/unread-count     unread counter (GET)
///
/// /scenes/{id}                         get, update, delete
/// /scenes/{id}/history                 edit history (GET)
/// /scenes/{id}/dialogues               list, create
///
/// /dialogues/{id}                      update, delete
///
/// /characters/{id}                     update, delete
///
/// /comments/{id}                       update, delete
///
/// /likes/my                            caller's liked webtoons (GET)
///
/// /chat/messages/{id}/read             mark read (PUT)
/// /chat/messages/batch-read            mark many read (POST)
/// /chat/messages/{id}                  delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Webtoons and their nested resources (scenes, characters, comments, chat).
        .nest("/webtoons", webtoon::router())
        // Scene-scoped sub-resources (dialogues, edit history).
        .nest("/scenes", scene::router())
        // Flat update/delete routes addressed by row id.
        .nest("/dialogues", dialogue::router())
        .nest("/characters", character::router())
        .nest("/comments", comment::router())
        // Caller's liked webtoons.
        .nest("/likes", like::router())
        // Read state and deletion for chat messages.
        .nest("/chat", chat::router())
}
