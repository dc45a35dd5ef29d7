use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Tag entity.
///
/// Inactive tags stay attached to existing posts but can no longer be
/// assigned, and listing posts by an inactive tag yields not-found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: 0,
            name,
            active: true,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, 50)
    }
}

/// Join row between a post and a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub id: i32,
    pub post_id: i32,
    pub tag_id: i32,
}

impl PostTag {
    pub fn new(post_id: i32, tag_id: i32) -> Self {
        Self {
            id: 0,
            post_id,
            tag_id,
        }
    }
}
