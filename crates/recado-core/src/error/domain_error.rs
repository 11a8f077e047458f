//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // Not found
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Invitation not found: {0}")]
    InvitationNotFound(Snowflake),

    #[error("Invite group not found: {0}")]
    InviteGroupNotFound(Snowflake),

    #[error("Chat not found: {0}")]
    ChatNotFound(Snowflake),

    // Validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    // Authorization
    #[error("Not a participant of this chat")]
    NotAParticipant,

    #[error("Not the invitee of this invitation")]
    NotInvitee,

    // Conflict
    #[error("Invitation already responded")]
    InvitationAlreadyResponded,

    // Infrastructure (wrapped)
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",
            Self::InviteGroupNotFound(_) => "UNKNOWN_INVITE_GROUP",
            Self::ChatNotFound(_) => "UNKNOWN_CHAT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::NotInvitee => "NOT_INVITEE",
            Self::InvitationAlreadyResponded => "ALREADY_RESPONDED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::InvitationNotFound(_)
                | Self::InviteGroupNotFound(_)
                | Self::ChatNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAParticipant | Self::NotInvitee)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::InvitationAlreadyResponded)
    }
}
