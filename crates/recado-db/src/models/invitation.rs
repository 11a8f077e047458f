//! Invite group and invitation database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the invite_groups table
#[derive(Debug, Clone, FromRow)]
pub struct InviteGroupModel {
    pub id: i64,
    pub inviter_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for the invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: i64,
    pub group_id: i64,
    pub invitee_id: i64,
    pub status: String,
    pub responded_at: Option<DateTime<Utc>>,
}

impl InvitationModel {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

/// Joined row: an invitation with its parent group's columns
#[derive(Debug, Clone, FromRow)]
pub struct InvitationWithGroupModel {
    pub id: i64,
    pub group_id: i64,
    pub invitee_id: i64,
    pub status: String,
    pub responded_at: Option<DateTime<Utc>>,
    pub inviter_id: i64,
    pub title: String,
    pub group_created_at: DateTime<Utc>,
}
