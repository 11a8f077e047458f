//! Repository traits (ports) - the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Chat, ChatMessage, DirectMessage, Invitation, InvitationWithGroup, InviteGroup, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Batch lookup of public profiles by ID ("in-list" query)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Direct Message Repository
// ============================================================================

#[async_trait]
pub trait DirectMessageRepository: Send + Sync {
    /// Insert one message (read = false)
    async fn create(&self, message: &DirectMessage) -> RepoResult<()>;

    /// Most recent `limit` messages addressed to `receiver_id`, newest first
    async fn find_inbox(&self, receiver_id: Snowflake, limit: i64) -> RepoResult<Vec<DirectMessage>>;

    /// Messages between two users in either direction, oldest first.
    /// Symmetric in its user arguments.
    async fn find_conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<DirectMessage>>;

    /// Mark every unread message from `from_user_id` to `owner_id` as read.
    /// Returns the number of rows transitioned.
    async fn mark_read(&self, owner_id: Snowflake, from_user_id: Snowflake) -> RepoResult<u64>;

    /// Global count of unread messages addressed to `owner_id`
    async fn unread_count(&self, owner_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Invitation Repository
// ============================================================================

/// Result of accepting an invitation: the (possibly pre-existing) chat and
/// its participant set after the idempotent inserts.
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    pub chat: Chat,
    pub participant_ids: Vec<Snowflake>,
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Insert the group and its pending invitation rows
    async fn create_group(
        &self,
        group: &InviteGroup,
        invitations: &[Invitation],
    ) -> RepoResult<()>;

    /// Find invitation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>>;

    /// All invitations addressed to `invitee_id`, newest first, joined with
    /// the parent group
    async fn find_for_invitee(&self, invitee_id: Snowflake) -> RepoResult<Vec<InvitationWithGroup>>;

    /// Count of this user's still-pending invitations (badge)
    async fn pending_count(&self, invitee_id: Snowflake) -> RepoResult<i64>;

    /// Accept a pending invitation.
    ///
    /// In one transaction: flips the status, materializes the group's chat
    /// if none exists yet (`new_chat_id` is used only in that case), and
    /// idempotently inserts participant rows for the inviter plus every
    /// currently-accepted invitee.
    ///
    /// Errors with `InvitationAlreadyResponded` if the row is not pending,
    /// `InvitationNotFound` if it does not exist.
    async fn accept(&self, invitation_id: Snowflake, new_chat_id: Snowflake)
        -> RepoResult<AcceptOutcome>;

    /// Reject a pending invitation. Same error contract as `accept`,
    /// no further side effect.
    async fn reject(&self, invitation_id: Snowflake) -> RepoResult<Invitation>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find chat by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Chat>>;

    /// Chats the user participates in, bounded
    async fn find_by_participant(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Chat>>;

    /// Whether a participant row exists for (chat, user)
    async fn is_participant(&self, chat_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Messages in a chat, oldest first, bounded
    async fn find_messages(&self, chat_id: Snowflake, limit: i64) -> RepoResult<Vec<ChatMessage>>;

    /// Append one message
    async fn create_message(&self, message: &ChatMessage) -> RepoResult<()>;
}
