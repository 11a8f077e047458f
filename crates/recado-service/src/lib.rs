//! # recado-service
//!
//! Application layer: request/response DTOs and the services that implement
//! the messaging, invitation, chat and notification use cases on top of the
//! repository traits from `recado-core`.

pub mod dto;
pub mod services;

pub use services::{
    ChatService, InvitationService, MessageService, NotificationService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
