//! Direct message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the direct_messages table
#[derive(Debug, Clone, FromRow)]
pub struct DirectMessageModel {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl DirectMessageModel {
    /// Check if the message still counts toward the receiver's unread badge
    #[inline]
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}
