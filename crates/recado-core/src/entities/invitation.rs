//! Group-chat invitation entities
//!
//! An `InviteGroup` is the proposal backing a batch of invitations; each
//! `Invitation` is one invitee's pending/accepted/rejected response. The
//! status transitions exactly once: pending -> accepted or pending -> rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A group-chat proposal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteGroup {
    pub id: Snowflake,
    pub inviter_id: Snowflake,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl InviteGroup {
    pub fn new(id: Snowflake, inviter_id: Snowflake, title: String) -> Self {
        Self {
            id,
            inviter_id,
            title,
            created_at: Utc::now(),
        }
    }
}

/// Invitation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    /// Stable string form used in the database and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Terminal states cannot transition again
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invitee's row against an InviteGroup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Snowflake,
    pub group_id: Snowflake,
    pub invitee_id: Snowflake,
    pub status: InvitationStatus,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Create a new pending invitation
    pub fn new(id: Snowflake, group_id: Snowflake, invitee_id: Snowflake) -> Self {
        Self {
            id,
            group_id,
            invitee_id,
            status: InvitationStatus::Pending,
            responded_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

/// Invitation joined with its parent group, as listed to the invitee
#[derive(Debug, Clone)]
pub struct InvitationWithGroup {
    pub invitation: Invitation,
    pub group: InviteGroup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Rejected,
        ] {
            assert_eq!(InvitationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InvitationStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Accepted.is_terminal());
        assert!(InvitationStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_new_invitation_is_pending() {
        let invitation = Invitation::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3));
        assert!(invitation.is_pending());
        assert!(invitation.responded_at.is_none());
    }
}
