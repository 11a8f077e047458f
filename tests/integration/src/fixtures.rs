//! Test fixtures and wire-shape mirrors
//!
//! Request builders and response mirrors for the messaging API endpoints.

use serde::{Deserialize, Serialize};

/// Success envelope: `{"data": ...}`
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Failure envelope: `{"error": "<message>"}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Count payload from the badge endpoints
#[derive(Debug, Deserialize)]
pub struct CountBody {
    pub count: i64,
}

/// Send direct message request
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub to: String,
    pub content: String,
}

impl SendMessageRequest {
    pub fn to(receiver_id: impl ToString, content: &str) -> Self {
        Self {
            to: receiver_id.to_string(),
            content: content.to_string(),
        }
    }
}

/// Direct message response
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

/// Public profile in responses
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// One inbox summary row
#[derive(Debug, Deserialize)]
pub struct SenderSummaryBody {
    pub sender: ProfileBody,
    pub unread: i64,
    pub last_message: MessageBody,
}

/// Propose group chat request
#[derive(Debug, Serialize)]
pub struct ProposeGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub invitees: Vec<String>,
}

impl ProposeGroupRequest {
    pub fn new(title: &str, invitees: &[impl ToString]) -> Self {
        Self {
            title: Some(title.to_string()),
            invitees: invitees.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Propose group chat response
#[derive(Debug, Deserialize)]
pub struct ProposeGroupBody {
    pub group_id: String,
    pub title: String,
    pub invitation_ids: Vec<String>,
}

/// Invitation listed to its invitee
#[derive(Debug, Deserialize)]
pub struct InvitationBody {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub inviter: Option<ProfileBody>,
    pub status: String,
    pub created_at: String,
}

/// Respond to invitation request
#[derive(Debug, Serialize)]
pub struct RespondRequest {
    pub accept: bool,
}

/// Respond to invitation response
#[derive(Debug, Deserialize)]
pub struct RespondOutcomeBody {
    pub status: String,
    pub chat: Option<ChatBody>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

/// Chat response
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub is_group: bool,
    pub created_at: String,
}

/// Post chat message request
#[derive(Debug, Serialize)]
pub struct PostChatMessageRequest {
    pub content: String,
}

/// Chat message response
#[derive(Debug, Deserialize)]
pub struct ChatMessageBody {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: String,
}
