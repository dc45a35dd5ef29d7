//! Repository implementations and connection management.

mod connections;
mod memory_base;
mod memory_repo;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

use std::sync::Arc;

use tabloid_core::ports::{
    CategoryRepository, CommentRepository, PostReactionRepository, PostRepository,
    PostTagRepository, ReactionRepository, SubscriptionRepository, TagRepository,
    UserProfileRepository,
};

pub use connections::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
pub use memory_base::{InMemoryRepository, InMemoryStore};
pub use memory_repo::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryPostReactionRepository,
    InMemoryPostRepository, InMemoryPostTagRepository, InMemoryReactionRepository,
    InMemorySubscriptionRepository, InMemoryTagRepository, InMemoryUserProfileRepository,
};

/// One handle per repository port, shared by every request handler.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserProfileRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub post_tags: Arc<dyn PostTagRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub post_reactions: Arc<dyn PostReactionRepository>,
}

impl Repositories {
    /// Repositories backed by a fresh in-memory store.
    ///
    /// Data is lost on process restart.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: Arc::new(InMemoryUserProfileRepository::new(store.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(store.clone())),
            tags: Arc::new(InMemoryTagRepository::new(store.clone())),
            post_tags: Arc::new(InMemoryPostTagRepository::new(store.clone())),
            subscriptions: Arc::new(InMemorySubscriptionRepository::new(store.clone())),
            reactions: Arc::new(InMemoryReactionRepository::new(store.clone())),
            post_reactions: Arc::new(InMemoryPostReactionRepository::new(store)),
        }
    }

    /// Repositories backed by a PostgreSQL connection pool.
    #[cfg(feature = "postgres")]
    pub fn postgres(db: &sea_orm::DbConn) -> Self {
        use postgres_repo::*;

        Self {
            users: Arc::new(PostgresUserProfileRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            post_tags: Arc::new(PostgresPostTagRepository::new(db.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepository::new(db.clone())),
            reactions: Arc::new(PostgresReactionRepository::new(db.clone())),
            post_reactions: Arc::new(PostgresPostReactionRepository::new(db.clone())),
        }
    }
}

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
