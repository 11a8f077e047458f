//! # recado-core
//!
//! Domain layer for the messaging core: entities, value objects, repository
//! traits, and domain errors. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Chat, ChatMessage, ChatParticipant, DirectMessage, Invitation, InvitationStatus,
    InvitationWithGroup, InviteGroup, SenderDigest, User,
};
pub use error::DomainError;
pub use traits::{
    AcceptOutcome, ChatRepository, DirectMessageRepository, InvitationRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
