use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// Role flag carried by every profile.
///
/// Stored and sent over the wire as its numeric id (`userTypeId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum UserType {
    /// Site administrator, allowed to moderate content.
    Admin,
    /// Regular author.
    Author,
}

impl UserType {
    pub const fn id(self) -> i32 {
        match self {
            UserType::Admin => 1,
            UserType::Author => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::Author => "Author",
        }
    }
}

impl From<UserType> for i32 {
    fn from(value: UserType) -> Self {
        value.id()
    }
}

impl TryFrom<i32> for UserType {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UserType::Admin),
            2 => Ok(UserType::Author),
            other => Err(DomainError::Validation(format!("unknown user type {other}"))),
        }
    }
}

/// UserProfile entity - an author known to the platform.
///
/// `firebase_user_id` is the subject id issued by the external identity
/// provider; every authenticated request is mapped back to a profile by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub firebase_user_id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_location: Option<String>,
    pub create_date_time: DateTime<Utc>,
    pub user_type: UserType,
}

impl UserProfile {
    /// Create a new regular author for the given identity provider subject.
    pub fn new(
        firebase_user_id: String,
        display_name: String,
        first_name: String,
        last_name: String,
        email: String,
        image_location: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            firebase_user_id,
            display_name,
            first_name,
            last_name,
            email,
            image_location,
            create_date_time: Utc::now(),
            user_type: UserType::Author,
        }
    }

    pub fn is_moderator(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("displayName", &self.display_name, 50)?;
        require_text("firstName", &self.first_name, 50)?;
        require_text("lastName", &self.last_name, 50)?;
        require_text("email", &self.email, 255)?;
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        Ok(())
    }
}
