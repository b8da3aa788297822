//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement operations
//! (like toggles and audited updates) open their own transactions so the
//! pair commits or rolls back as one.

pub mod character_repo;
pub mod chat_message_repo;
pub mod comment_repo;
pub mod dialogue_repo;
pub mod edit_history_repo;
pub mod like_repo;
pub mod scene_repo;
pub mod webtoon_repo;

pub use character_repo::CharacterRepo;
pub use chat_message_repo::ChatMessageRepo;
pub use comment_repo::CommentRepo;
pub use dialogue_repo::DialogueRepo;
pub use edit_history_repo::EditHistoryRepo;
pub use like_repo::LikeRepo;
pub use scene_repo::SceneRepo;
pub use webtoon_repo::WebtoonRepo;
