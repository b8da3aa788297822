//! Route definitions for webtoons and their nested resources.
//!
//! Everything a visitor reaches through a specific webtoon -- scenes,
//! characters, comments, likes, and the chat inbox -- is mounted here.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, chat, comment, like, scene, webtoon};
use crate::state::AppState;

/// Routes mounted at `/webtoons`.
///
/// ```text
/// GET    /                       list
/// POST   /                       create
/// GET    /my                     list_mine
/// GET    /{id}                   get_by_id
/// PUT    /{id}                   update
/// DELETE /{id}                   delete
/// POST   /{id}/like              toggle
/// GET    /{id}/characters        list_by_webtoon
/// POST   /{id}/characters        create
/// GET    /{id}/comments          list_by_webtoon
/// POST   /{id}/comments          create
/// GET    /{id}/scenes            list_by_webtoon
/// POST   /{id}/scenes            create
/// POST   /{id}/scenes/batch      create_batch
/// GET    /{id}/chat/messages     list_messages
/// POST   /{id}/chat/messages     send_message
/// GET    /{id}/chat/unread-count unread_count
/// ```
pub fn router() -> Router<AppState> {
    let chat_routes = Router::new()
        .route(
            "/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .route("/unread-count", get(chat::unread_count));

    Router::new()
        .route("/", get(webtoon::list).post(webtoon::create))
        .route("/my", get(webtoon::list_mine))
        .route(
            "/{id}",
            get(webtoon::get_by_id)
                .put(webtoon::update)
                .delete(webtoon::delete),
        )
        .route("/{id}/like", post(like::toggle))
        .route(
            "/{id}/characters",
            get(character::list_by_webtoon).post(character::create),
        )
        .route(
            "/{id}/comments",
            get(comment::list_by_webtoon).post(comment::create),
        )
        .route(
            "/{id}/scenes",
            get(scene::list_by_webtoon).post(scene::create),
        )
        .route("/{id}/scenes/batch", post(scene::create_batch))
        .nest("/{id}/chat", chat_routes)
}
