//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod favorite_repo;
pub mod role_repo;
pub mod talk_comment_repo;
pub mod talk_meta_repo;
pub mod talk_repo;
pub mod user_repo;

pub use favorite_repo::FavoriteRepo;
pub use role_repo::RoleRepo;
pub use talk_comment_repo::TalkCommentRepo;
pub use talk_meta_repo::TalkMetaRepo;
pub use talk_repo::TalkRepo;
pub use user_repo::UserRepo;
