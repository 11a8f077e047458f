//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account. Created at registration, never hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub profile_description: Option<String>,
    /// Per-user UI theme color
    pub theme: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, email: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            full_name,
            avatar_url: None,
            profile_description: None,
            theme: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the avatar URL
    pub fn set_avatar_url(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }

    /// Update the theme color
    pub fn set_theme(&mut self, theme: Option<String>) {
        self.theme = theme;
        self.updated_at = Utc::now();
    }
}
