use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Category, Comment, Post, PostReaction, PostTag, Reaction, Subscription, Tag, UserProfile,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// List every entity.
    async fn get_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. The incoming ID is ignored and the stored entity
    /// is returned with its assigned ID.
    async fn add(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` when no
    /// row has the entity's ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UserProfileRepository: BaseRepository<UserProfile, i32> {
    async fn find_by_firebase_user_id(
        &self,
        firebase_user_id: &str,
    ) -> Result<Option<UserProfile>, RepoError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<UserProfile>, RepoError>;
}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;
}

/// Post repository. Listings come back newest publish date first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Approved posts whose publish date is not after `now`.
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// The `limit` most recent approved, published posts.
    async fn find_home(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Post>, RepoError>;

    async fn find_by_user_profile_id(&self, user_profile_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Posts by any of the given authors.
    async fn find_by_user_profile_ids(&self, ids: &[i32]) -> Result<Vec<Post>, RepoError>;

    /// Posts joined to the tag through `post_tag`.
    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError>;

    async fn find_unapproved(&self) -> Result<Vec<Post>, RepoError>;

    async fn count_by_category_id(&self, category_id: i32) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    /// Comments on a post, newest first.
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;
}

#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;
}

#[async_trait]
pub trait PostTagRepository: BaseRepository<PostTag, i32> {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostTag>, RepoError>;

    async fn find_by_post_and_tag(
        &self,
        post_id: i32,
        tag_id: i32,
    ) -> Result<Option<PostTag>, RepoError>;
}

#[async_trait]
pub trait SubscriptionRepository: BaseRepository<Subscription, i32> {
    async fn find_by_subscriber_id(
        &self,
        subscriber_user_profile_id: i32,
    ) -> Result<Vec<Subscription>, RepoError>;

    async fn find_by_pair(
        &self,
        subscriber_user_profile_id: i32,
        provider_user_profile_id: i32,
    ) -> Result<Option<Subscription>, RepoError>;
}

#[async_trait]
pub trait ReactionRepository: BaseRepository<Reaction, i32> {}

#[async_trait]
pub trait PostReactionRepository: BaseRepository<PostReaction, i32> {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostReaction>, RepoError>;

    async fn find_existing(
        &self,
        post_id: i32,
        reaction_id: i32,
        user_profile_id: i32,
    ) -> Result<Option<PostReaction>, RepoError>;
}
