//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AcceptOutcome, ChatRepository, DirectMessageRepository, InvitationRepository, RepoResult,
    UserRepository,
};
