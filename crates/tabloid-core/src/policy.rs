//! Authorization and visibility rules shared by every endpoint.

use crate::domain::{Comment, Post, PostReaction, Subscription, UserProfile, UserType};
use crate::error::DomainError;

/// A resource that belongs to exactly one user profile.
pub trait Owned {
    fn owner_id(&self) -> i32;
}

impl Owned for Post {
    fn owner_id(&self) -> i32 {
        self.user_profile_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> i32 {
        self.user_profile_id
    }
}

impl Owned for PostReaction {
    fn owner_id(&self) -> i32 {
        self.user_profile_id
    }
}

impl Owned for Subscription {
    fn owner_id(&self) -> i32 {
        self.subscriber_user_profile_id
    }
}

/// Allow `user` to act on `resource` when they own it, or when they hold
/// `role` (if one is given).
pub fn resource_owner_or_role<R: Owned>(
    resource: &R,
    user: &UserProfile,
    role: Option<UserType>,
) -> Result<(), DomainError> {
    if resource.owner_id() == user.id || role.is_some_and(|r| user.user_type == r) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}

/// Allow `user` only when they hold `role`.
pub fn require_role(user: &UserProfile, role: UserType) -> Result<(), DomainError> {
    if user.user_type == role {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}

/// Unapproved posts are visible only to their author and to moderators.
pub fn can_view_post(post: &Post, viewer: &UserProfile) -> bool {
    post.is_approved || resource_owner_or_role(post, viewer, Some(UserType::Admin)).is_ok()
}

/// Drop every post `viewer` is not allowed to see.
pub fn visible_posts(posts: Vec<Post>, viewer: &UserProfile) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| can_view_post(post, viewer))
        .collect()
}
