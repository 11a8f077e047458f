//! Application services

mod chat;
mod context;
mod error;
mod invitation;
mod message;
mod notification;

pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
pub use message::MessageService;
pub use notification::NotificationService;
