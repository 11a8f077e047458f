//! Chat database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the chats table
#[derive(Debug, Clone, FromRow)]
pub struct ChatModel {
    pub id: i64,
    pub invite_group_id: Option<i64>,
    pub title: String,
    pub owner_id: i64,
    pub is_group: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for the chat_participants table
#[derive(Debug, Clone, FromRow)]
pub struct ChatParticipantModel {
    pub chat_id: i64,
    pub user_id: i64,
}

/// Database model for the chat_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
