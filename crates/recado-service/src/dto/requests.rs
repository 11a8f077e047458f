//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies carrying free text also
//! implement `Validate`. Snowflake IDs arrive as strings or numbers.

use recado_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

/// Send a direct message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Receiver user ID
    pub to: Snowflake,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}

/// Propose a group chat to a set of invitees
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProposeGroupRequest {
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,

    pub invitees: Vec<Snowflake>,
}

/// Accept or reject an invitation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondInvitationRequest {
    pub accept: bool,
}

/// Post a message into a group chat
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostChatMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every request body goes through the validated-JSON extractor, so each
    // DTO must implement Validate, constraint fields or not.
    #[test]
    fn test_all_request_bodies_validate() {
        let send: SendMessageRequest =
            serde_json::from_str(r#"{"to": "1", "content": "hi"}"#).unwrap();
        assert!(send.validate().is_ok());

        let propose: ProposeGroupRequest =
            serde_json::from_str(r#"{"title": "Trip", "invitees": ["2"]}"#).unwrap();
        assert!(propose.validate().is_ok());

        let respond: RespondInvitationRequest =
            serde_json::from_str(r#"{"accept": true}"#).unwrap();
        assert!(respond.validate().is_ok());
        assert!(respond.accept);

        let post: PostChatMessageRequest =
            serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_oversized_content_is_rejected() {
        let send = SendMessageRequest {
            to: Snowflake::new(1),
            content: "x".repeat(4001),
        };
        assert!(send.validate().is_err());
    }
}
