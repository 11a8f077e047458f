//! Database models with SQLx FromRow derives

mod chat;
mod direct_message;
mod invitation;
mod user;

pub use chat::{ChatMessageModel, ChatModel, ChatParticipantModel};
pub use direct_message::DirectMessageModel;
pub use invitation::{InvitationModel, InvitationWithGroupModel, InviteGroupModel};
pub use user::UserModel;
