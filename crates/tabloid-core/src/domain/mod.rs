//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;
mod reaction;
mod subscription;
mod tag;
mod user_profile;

pub use category::Category;
pub use comment::Comment;
pub use post::{Post, READ_TIME_CHARS_PER_MINUTE, ReadTime};
pub use reaction::{PostReaction, Reaction, ReactionCount};
pub use subscription::{
    LEGACY_ACTIVE_END_DATE, Subscription, SubscriptionAction, SubscriptionState,
    SubscriptionStatus,
};
pub use tag::{PostTag, Tag};
pub use user_profile::{UserProfile, UserType};

use crate::error::DomainError;

/// Reject blank or oversized text fields.
pub(crate) fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}
