//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabloid_core::domain::{
    Category, Comment, Post, PostReaction, PostTag, Reaction, ReactionCount, Subscription,
    SubscriptionAction, SubscriptionState, SubscriptionStatus, Tag, UserProfile,
};

// ---------------------------------------------------------------------------
// User profiles
// ---------------------------------------------------------------------------

/// Request to create the caller's profile after signing up with the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserProfileRequest {
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub image_location: Option<String>,
}

/// Full profile, returned to the profile owner and to moderators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: i32,
    pub firebase_user_id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTime<Utc>,
    pub user_type_id: i32,
    pub user_type_name: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            firebase_user_id: user.firebase_user_id,
            display_name: user.display_name,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            image_location: user.image_location,
            create_date_time: user.create_date_time,
            user_type_id: user.user_type.id(),
            user_type_name: user.user_type.name().to_string(),
        }
    }
}

/// Public part of a profile embedded in posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i32,
    pub display_name: String,
    pub image_location: Option<String>,
}

impl From<&UserProfile> for AuthorResponse {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            image_location: user.image_location.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_location: Option<String>,
    #[serde(default)]
    pub publish_date_time: Option<DateTime<Utc>>,
    pub category_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_location: Option<String>,
    #[serde(default)]
    pub publish_date_time: Option<DateTime<Utc>>,
    pub category_id: i32,
}

/// Moderator request to approve or unapprove a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub id: i32,
    pub is_approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTime<Utc>,
    pub publish_date_time: Option<DateTime<Utc>>,
    pub is_approved: bool,
    pub category_id: i32,
    pub category: Option<CategoryResponse>,
    pub user_profile_id: i32,
    pub user_profile: Option<AuthorResponse>,
}

impl PostResponse {
    /// Build a response, embedding the author and category when known.
    pub fn new(post: Post, author: Option<&UserProfile>, category: Option<&Category>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_location: post.image_location,
            create_date_time: post.create_date_time,
            publish_date_time: post.publish_date_time,
            is_approved: post.is_approved,
            category_id: post.category_id,
            category: category.cloned().map(Into::into),
            user_profile_id: post.user_profile_id,
            user_profile: author.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCountResponse {
    pub reaction: ReactionResponse,
    pub count: u64,
}

impl From<ReactionCount> for ReactionCountResponse {
    fn from(count: ReactionCount) -> Self {
        Self {
            reaction: count.reaction.into(),
            count: count.count,
        }
    }
}

/// A post together with everything its detail page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailsResponse {
    pub post: PostResponse,
    pub reaction_counts: Vec<ReactionCountResponse>,
    pub comments: Vec<CommentResponse>,
    pub read_time: String,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: i32,
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub id: i32,
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub user_profile_id: i32,
    pub user_profile: Option<AuthorResponse>,
    pub subject: String,
    pub content: String,
    pub create_date_time: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: Comment, author: Option<&UserProfile>) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_profile_id: comment.user_profile_id,
            user_profile: author.map(Into::into),
            subject: comment.subject,
            content: comment.content,
            create_date_time: comment.create_date_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    pub id: i32,
    pub name: String,
    /// Leave unchanged when omitted.
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            active: tag.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostTagRequest {
    pub post_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTagResponse {
    pub id: i32,
    pub post_id: i32,
    pub tag_id: i32,
    pub tag: Option<TagResponse>,
}

impl PostTagResponse {
    pub fn new(post_tag: PostTag, tag: Option<&Tag>) -> Self {
        Self {
            id: post_tag.id,
            post_id: post_tag.post_id,
            tag_id: post_tag.tag_id,
            tag: tag.cloned().map(Into::into),
        }
    }
}

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReactionRequest {
    pub name: String,
    pub image_location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: i32,
    pub name: String,
    pub image_location: String,
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self {
            id: reaction.id,
            name: reaction.name,
            image_location: reaction.image_location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostReactionRequest {
    pub post_id: i32,
    pub reaction_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReactionResponse {
    pub id: i32,
    pub post_id: i32,
    pub reaction_id: i32,
    pub user_profile_id: i32,
}

impl From<PostReaction> for PostReactionResponse {
    fn from(post_reaction: PostReaction) -> Self {
        Self {
            id: post_reaction.id,
            post_id: post_reaction.post_id,
            reaction_id: post_reaction.reaction_id,
            user_profile_id: post_reaction.user_profile_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub provider_user_profile_id: i32,
}

/// Request to change a subscription's status.
///
/// One of `status` or `endDateTime` must be present.
/// `endDateTime` is accepted from older clients: the far-future marker
/// means active, any other date means ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub id: i32,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub end_date_time: Option<String>,
}

impl UpdateSubscriptionRequest {
    pub fn requested_status(&self) -> Option<SubscriptionStatus> {
        self.status.or_else(|| {
            self.end_date_time
                .as_deref()
                .map(SubscriptionState::requested_by_end_date)
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: i32,
    pub subscriber_user_profile_id: i32,
    pub provider_user_profile_id: i32,
    pub begin_date_time: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub end_date_time: Option<DateTime<Utc>>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            subscriber_user_profile_id: sub.subscriber_user_profile_id,
            provider_user_profile_id: sub.provider_user_profile_id,
            begin_date_time: sub.begin_date_time,
            status: sub.state.status(),
            end_date_time: sub.state.end_date_time(),
        }
    }
}

/// The caller's relationship to one author and what the subscribe button should do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLookupResponse {
    pub subscription: Option<SubscriptionResponse>,
    pub next_action: SubscriptionAction,
}
