//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    sea_query::{Expr, Func, JoinType},
};

use tabloid_core::domain::{
    Category, Comment, Post, PostReaction, PostTag, Subscription, Tag, UserProfile,
};
use tabloid_core::error::RepoError;
use tabloid_core::ports::{
    CategoryRepository, CommentRepository, PostReactionRepository, PostRepository,
    PostTagRepository, ReactionRepository, SubscriptionRepository, TagRepository,
    UserProfileRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_reaction::{self, Entity as PostReactionEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::reaction::Entity as ReactionEntity;
use super::entity::subscription::{self, Entity as SubscriptionEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user_profile::{self, Entity as UserProfileEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

pub type PostgresUserProfileRepository = PostgresBaseRepository<UserProfileEntity>;
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;
pub type PostgresPostTagRepository = PostgresBaseRepository<PostTagEntity>;
pub type PostgresSubscriptionRepository = PostgresBaseRepository<SubscriptionEntity>;
pub type PostgresReactionRepository = PostgresBaseRepository<ReactionEntity>;
pub type PostgresPostReactionRepository = PostgresBaseRepository<PostReactionEntity>;

fn into_domain<M, T: From<M>>(models: Vec<M>) -> Vec<T> {
    models.into_iter().map(Into::into).collect()
}

#[async_trait]
impl UserProfileRepository for PostgresUserProfileRepository {
    async fn find_by_firebase_user_id(
        &self,
        firebase_user_id: &str,
    ) -> Result<Option<UserProfile>, RepoError> {
        tracing::debug!(firebase_user_id, "Finding user profile by provider subject");

        let result = UserProfileEntity::find()
            .filter(user_profile::Column::FirebaseUserId.eq(firebase_user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<UserProfile>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserProfileEntity::find()
            .filter(user_profile::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((CategoryEntity, category::Column::Name))))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let now: DateTime<FixedOffset> = now.into();
        let result = PostEntity::find()
            .filter(post::Column::IsApproved.eq(true))
            .filter(post::Column::PublishDateTime.lte(now))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_home(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Post>, RepoError> {
        let now: DateTime<FixedOffset> = now.into();
        let result = PostEntity::find()
            .filter(post::Column::IsApproved.eq(true))
            .filter(post::Column::PublishDateTime.lte(now))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_by_user_profile_id(&self, user_profile_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserProfileId.eq(user_profile_id))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_by_user_profile_ids(&self, ids: &[i32]) -> Result<Vec<Post>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PostEntity::find()
            .filter(post::Column::UserProfileId.is_in(ids.iter().copied()))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .join(JoinType::InnerJoin, post::Relation::PostTag.def())
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_unapproved(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::IsApproved.eq(false))
            .order_by_desc(post::Column::PublishDateTime)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn count_by_category_id(&self, category_id: i32) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreateDateTime)
            .order_by_desc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((TagEntity, tag::Column::Name))))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostTagRepository for PostgresPostTagRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostTag>, RepoError> {
        let result = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(post_tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_by_post_and_tag(
        &self,
        post_id: i32,
        tag_id: i32,
    ) -> Result<Option<PostTag>, RepoError> {
        let result = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .filter(post_tag::Column::TagId.eq(tag_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_by_subscriber_id(
        &self,
        subscriber_user_profile_id: i32,
    ) -> Result<Vec<Subscription>, RepoError> {
        let result = SubscriptionEntity::find()
            .filter(subscription::Column::SubscriberUserProfileId.eq(subscriber_user_profile_id))
            .order_by_asc(subscription::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_by_pair(
        &self,
        subscriber_user_profile_id: i32,
        provider_user_profile_id: i32,
    ) -> Result<Option<Subscription>, RepoError> {
        let result = SubscriptionEntity::find()
            .filter(subscription::Column::SubscriberUserProfileId.eq(subscriber_user_profile_id))
            .filter(subscription::Column::ProviderUserProfileId.eq(provider_user_profile_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {}

#[async_trait]
impl PostReactionRepository for PostgresPostReactionRepository {
    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<PostReaction>, RepoError> {
        let result = PostReactionEntity::find()
            .filter(post_reaction::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(into_domain(result))
    }

    async fn find_existing(
        &self,
        post_id: i32,
        reaction_id: i32,
        user_profile_id: i32,
    ) -> Result<Option<PostReaction>, RepoError> {
        let result = PostReactionEntity::find()
            .filter(post_reaction::Column::PostId.eq(post_id))
            .filter(post_reaction::Column::ReactionId.eq(reaction_id))
            .filter(post_reaction::Column::UserProfileId.eq(user_profile_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
