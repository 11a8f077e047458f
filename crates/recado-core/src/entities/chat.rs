//! Chat entities - materialized group conversations

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A materialized multi-participant conversation.
///
/// Created lazily on the first accepted invitation of an InviteGroup;
/// `invite_group_id` is unique so a group materializes at most one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: Snowflake,
    pub invite_group_id: Option<Snowflake>,
    pub title: String,
    pub owner_id: Snowflake,
    pub is_group: bool,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// Create a chat materialized from an invite group
    pub fn from_invite_group(
        id: Snowflake,
        group_id: Snowflake,
        title: String,
        owner_id: Snowflake,
    ) -> Self {
        Self {
            id,
            invite_group_id: Some(group_id),
            title,
            owner_id,
            is_group: true,
            created_at: Utc::now(),
        }
    }
}

/// Chat membership row. Append-only; membership never shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatParticipant {
    pub chat_id: Snowflake,
    pub user_id: Snowflake,
}

/// A message posted into a chat. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Snowflake,
    pub chat_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(id: Snowflake, chat_id: Snowflake, sender_id: Snowflake, content: String) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialized_chat_is_group() {
        let chat = Chat::from_invite_group(
            Snowflake::new(1),
            Snowflake::new(2),
            "Trip".to_string(),
            Snowflake::new(3),
        );
        assert!(chat.is_group);
        assert_eq!(chat.invite_group_id, Some(Snowflake::new(2)));
        assert_eq!(chat.owner_id, Snowflake::new(3));
    }
}
