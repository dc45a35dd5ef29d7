//! In-memory repository implementations.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tabloid_core::domain::{
    Category, Comment, Post, PostReaction, PostTag, Reaction, Subscription, Tag, UserProfile,
};
use tabloid_core::error::RepoError;
use tabloid_core::ports::{
    CategoryRepository, CommentRepository, PostReactionRepository, PostRepository,
    PostTagRepository, ReactionRepository, SubscriptionRepository, TagRepository,
    UserProfileRepository,
};

use super::memory_base::{InMemoryRepository, Stored, Table, Tables};

pub type InMemoryUserProfileRepository = InMemoryRepository<UserProfile>;
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;
pub type InMemoryTagRepository = InMemoryRepository<Tag>;
pub type InMemoryPostTagRepository = InMemoryRepository<PostTag>;
pub type InMemorySubscriptionRepository = InMemoryRepository<Subscription>;
pub type InMemoryReactionRepository = InMemoryRepository<Reaction>;
pub type InMemoryPostReactionRepository = InMemoryRepository<PostReaction>;

macro_rules! stored {
    ($entity:ty, $name:literal, $table:ident) => {
        const NAME: &'static str = $name;

        fn id(&self) -> i32 {
            self.id
        }

        fn set_id(&mut self, id: i32) {
            self.id = id;
        }

        fn table(tables: &Tables) -> &Table<$entity> {
            &tables.$table
        }

        fn table_mut(tables: &mut Tables) -> &mut Table<$entity> {
            &mut tables.$table
        }
    };
}

impl Stored for UserProfile {
    stored!(UserProfile, "user profile", user_profiles);

    fn conflicts_with(&self, other: &Self) -> bool {
        self.firebase_user_id == other.firebase_user_id
    }
}

impl Stored for Category {
    stored!(Category, "category", categories);

    fn conflicts_with(&self, other: &Self) -> bool {
        same_name(&self.name, &other.name)
    }
}

impl Stored for Post {
    stored!(Post, "post", posts);

    fn cascade_delete(tables: &mut Tables, id: i32) {
        tables.comments.rows.retain(|c| c.post_id != id);
        tables.post_tags.rows.retain(|pt| pt.post_id != id);
        tables.post_reactions.rows.retain(|pr| pr.post_id != id);
    }
}

impl Stored for Comment {
    stored!(Comment, "comment", comments);
}

impl Stored for Tag {
    stored!(Tag, "tag", tags);

    fn conflicts_with(&self, other: &Self) -> bool {
        same_name(&self.name, &other.name)
    }

    fn cascade_delete(tables: &mut Tables, id: i32) {
        tables.post_tags.rows.retain(|pt| pt.tag_id != id);
    }
}

impl Stored for PostTag {
    stored!(PostTag, "post tag", post_tags);

    fn conflicts_with(&self, other: &Self) -> bool {
        self.post_id == other.post_id && self.tag_id == other.tag_id
    }
}

impl Stored for Subscription {
    stored!(Subscription, "subscription", subscriptions);

    fn conflicts_with(&self, other: &Self) -> bool {
        self.subscriber_user_profile_id == other.subscriber_user_profile_id
            && self.provider_user_profile_id == other.provider_user_profile_id
    }
}

impl Stored for Reaction {
    stored!(Reaction, "reaction", reactions);

    fn cascade_delete(tables: &mut Tables, id: i32) {
        tables.post_reactions.rows.retain(|pr| pr.reaction_id != id);
    }
}

impl Stored for PostReaction {
    stored!(PostReaction, "post reaction", post_reactions);

    fn conflicts_with(&self, other: &Self) -> bool {
        self.post_id == other.post_id
            && self.reaction_id == other.reaction_id
            && self.user_profile_id == other.user_profile_id
    }
}

/// Tag and category names are unique regardless of case, as with the
/// `lower(name)` indexes in Postgres.
fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Newest publish date first; unpublished drafts last.
fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by_key(|p| (Reverse(p.publish_date_time), Reverse(p.id)));
    posts
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_firebase_user_id(
        &self,
        firebase_user_id: &str,
    ) -> Result<Option<UserProfile>, RepoError> {
        Ok(self
            .select_one(|u| u.firebase_user_id == firebase_user_id)
            .await)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<UserProfile>, RepoError> {
        Ok(self.select(|u| ids.contains(&u.id)).await)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        Ok(self.select_one(|c| same_name(&c.name, name)).await)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let posts = self
            .select(|p| p.is_approved && p.is_published_at(now))
            .await;
        Ok(newest_first(posts))
    }

    async fn find_home(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.find_published(now).await?;
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_by_user_profile_id(&self, user_profile_id: i32) -> Result<Vec<Post>, RepoError> {
        let posts = self
            .select(|p| p.user_profile_id == user_profile_id)
            .await;
        Ok(newest_first(posts))
    }

    async fn find_by_user_profile_ids(&self, ids: &[i32]) -> Result<Vec<Post>, RepoError> {
        let posts = self.select(|p| ids.contains(&p.user_profile_id)).await;
        Ok(newest_first(posts))
    }

    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let post_ids: Vec<i32> = tables
            .post_tags
            .rows
            .iter()
            .filter(|pt| pt.tag_id == tag_id)
            .map(|pt| pt.post_id)
            .collect();
        let posts = tables
            .posts
            .rows
            .iter()
            .filter(|p| post_ids.contains(&p.id))
            .cloned()
            .collect();
        Ok(newest_first(posts))
    }

    async fn find_unapproved(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.select(|p| !p.is_approved).await;
        Ok(newest_first(posts))
    }

    async fn count_by_category_id(&self, category_id: i32) -> Result<u64, RepoError> {
        Ok(self.select(|p| p.category_id == category_id).await.len() as u64)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self.select(|c| c.post_id == post_id).await;
        comments.sort_by_key(|c| (Reverse(c.create_date_time), Reverse(c.id)));
        Ok(comments)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        Ok(self.select_one(|t| same_name(&t.name, name)).await)
    }
}

#[async_trait]
impl PostTagRepository for InMemoryPostTagRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostTag>, RepoError> {
        Ok(self.select(|pt| pt.post_id == post_id).await)
    }

    async fn find_by_post_and_tag(
        &self,
        post_id: i32,
        tag_id: i32,
    ) -> Result<Option<PostTag>, RepoError> {
        Ok(self
            .select_one(|pt| pt.post_id == post_id && pt.tag_id == tag_id)
            .await)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_by_subscriber_id(
        &self,
        subscriber_user_profile_id: i32,
    ) -> Result<Vec<Subscription>, RepoError> {
        Ok(self
            .select(|s| s.subscriber_user_profile_id == subscriber_user_profile_id)
            .await)
    }

    async fn find_by_pair(
        &self,
        subscriber_user_profile_id: i32,
        provider_user_profile_id: i32,
    ) -> Result<Option<Subscription>, RepoError> {
        Ok(self
            .select_one(|s| {
                s.subscriber_user_profile_id == subscriber_user_profile_id
                    && s.provider_user_profile_id == provider_user_profile_id
            })
            .await)
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {}

#[async_trait]
impl PostReactionRepository for InMemoryPostReactionRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostReaction>, RepoError> {
        Ok(self.select(|pr| pr.post_id == post_id).await)
    }

    async fn find_existing(
        &self,
        post_id: i32,
        reaction_id: i32,
        user_profile_id: i32,
    ) -> Result<Option<PostReaction>, RepoError> {
        Ok(self
            .select_one(|pr| {
                pr.post_id == post_id
                    && pr.reaction_id == reaction_id
                    && pr.user_profile_id == user_profile_id
            })
            .await)
    }
}
