//! Domain entities

mod chat;
mod direct_message;
mod invitation;
mod user;

pub use chat::{Chat, ChatMessage, ChatParticipant};
pub use direct_message::{DirectMessage, SenderDigest};
pub use invitation::{Invitation, InvitationStatus, InvitationWithGroup, InviteGroup};
pub use user::User;
