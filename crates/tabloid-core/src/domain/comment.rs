use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Comment entity - a reply left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub user_profile_id: i32,
    pub subject: String,
    pub content: String,
    pub create_date_time: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: i32, user_profile_id: i32, subject: String, content: String) -> Self {
        Self {
            id: 0,
            post_id,
            user_profile_id,
            subject,
            content,
            create_date_time: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("subject", &self.subject, 255)?;
        require_text("content", &self.content, 10_000)
    }
}
