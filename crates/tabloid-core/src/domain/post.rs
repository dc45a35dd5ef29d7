use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Characters an average reader gets through per minute.
pub const READ_TIME_CHARS_PER_MINUTE: usize = 265;

/// Post entity - an article written by a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTime<Utc>,
    pub publish_date_time: Option<DateTime<Utc>>,
    pub is_approved: bool,
    pub category_id: i32,
    pub user_profile_id: i32,
}

impl Post {
    /// Create a new, unapproved post.
    pub fn new(
        user_profile_id: i32,
        category_id: i32,
        title: String,
        content: String,
        image_location: Option<String>,
        publish_date_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: 0,
            title,
            content,
            image_location,
            create_date_time: Utc::now(),
            publish_date_time,
            is_approved: false,
            category_id,
            user_profile_id,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title, 255)?;
        require_text("content", &self.content, usize::MAX)
    }

    /// Whether the post has a publish date that is not in the future.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.publish_date_time.is_some_and(|published| published <= now)
    }

    pub fn read_time(&self) -> ReadTime {
        ReadTime::for_content(&self.content)
    }
}

/// Estimated reading time of a post body, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTime {
    pub minutes: usize,
}

impl ReadTime {
    pub fn for_content(content: &str) -> Self {
        Self {
            minutes: content.chars().count() / READ_TIME_CHARS_PER_MINUTE,
        }
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes <= 1 {
            write!(f, "A minute")
        } else {
            write!(f, "{} minutes", self.minutes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn read_time_of(len: usize) -> String {
        ReadTime::for_content(&"a".repeat(len)).to_string()
    }

    #[test]
    fn test_short_posts_take_a_minute() {
        assert_eq!(read_time_of(0), "A minute");
        assert_eq!(read_time_of(264), "A minute");
        assert_eq!(read_time_of(265), "A minute");
        assert_eq!(read_time_of(529), "A minute");
    }

    #[test]
    fn test_longer_posts_report_whole_minutes() {
        assert_eq!(read_time_of(530), "2 minutes");
        assert_eq!(read_time_of(794), "2 minutes");
        assert_eq!(read_time_of(795), "3 minutes");
        assert_eq!(read_time_of(265 * 12 + 10), "12 minutes");
    }

    #[test]
    fn test_read_time_counts_characters_not_bytes() {
        // 300 two-byte characters is 600 bytes but only one minute of reading.
        let content = "é".repeat(300);
        assert_eq!(ReadTime::for_content(&content).to_string(), "A minute");
    }

    #[test]
    fn test_is_published_at() {
        let now = Utc::now();
        let mut post = Post::new(1, 1, "t".into(), "c".into(), None, None);
        assert!(!post.is_published_at(now));

        post.publish_date_time = Some(now - Duration::hours(1));
        assert!(post.is_published_at(now));

        post.publish_date_time = Some(now + Duration::hours(1));
        assert!(!post.is_published_at(now));
    }

    #[test]
    fn test_validate_requires_title() {
        let post = Post::new(1, 1, "   ".into(), "body".into(), None, None);
        assert!(matches!(post.validate(), Err(DomainError::Validation(_))));
    }
}
