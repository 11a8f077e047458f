//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Count payload used by the badge endpoints
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Public user profile (no email)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// A direct message on the wire
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// One inbox-summary row: a sender plus their latest message and windowed
/// unread count
#[derive(Debug, Serialize)]
pub struct SenderSummaryResponse {
    pub sender: UserProfileResponse,
    pub unread: i64,
    pub last_message: MessageResponse,
}

/// An invitation as listed to its invitee
#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub inviter: Option<UserProfileResponse>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

/// Result of proposing a group chat
#[derive(Debug, Serialize)]
pub struct ProposeGroupResponse {
    pub group_id: String,
    pub title: String,
    pub invitation_ids: Vec<String>,
}

/// Result of responding to an invitation. `chat` is present only on accept.
#[derive(Debug, Serialize)]
pub struct RespondOutcomeResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participant_ids: Vec<String>,
}

/// A chat on the wire
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub is_group: bool,
    pub created_at: DateTime<Utc>,
}

/// A chat message on the wire
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
