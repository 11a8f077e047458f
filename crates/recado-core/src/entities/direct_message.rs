//! Direct message entity - one-to-one messages with a read flag

use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::value_objects::Snowflake;

/// A one-to-one message. Immutable after creation except for the
/// forward-only read flag (unread -> read, never back).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMessage {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl DirectMessage {
    /// Create a new unread message
    pub fn new(id: Snowflake, sender_id: Snowflake, receiver_id: Snowflake, content: String) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// One inbox-summary row: a sender's latest message plus that sender's
/// unread count within the scanned window. The window is the most recent N
/// received messages, so counts are window-bounded, not global.
#[derive(Debug, Clone)]
pub struct SenderDigest {
    pub sender: User,
    pub unread: i64,
    pub last_message: DirectMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_unread() {
        let msg = DirectMessage::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "hola".to_string(),
        );
        assert!(!msg.read);
        assert_eq!(msg.sender_id, Snowflake::new(10));
        assert_eq!(msg.receiver_id, Snowflake::new(20));
    }
}
