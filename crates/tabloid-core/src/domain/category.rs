use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Category entity - every post belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, 50)
    }
}
