//! PostgreSQL repository implementations

pub mod error;

mod chat;
mod direct_message;
mod invitation;
mod user;

pub use chat::PgChatRepository;
pub use direct_message::PgDirectMessageRepository;
pub use invitation::PgInvitationRepository;
pub use user::PgUserRepository;
