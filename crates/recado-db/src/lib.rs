//! # recado-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `recado-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional invitation
//!   acceptance path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recado_db::pool::{create_pool, PoolConfig};
//! use recado_db::PgDirectMessageRepository;
//! use recado_core::traits::DirectMessageRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PoolConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let messages = PgDirectMessageRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, PgPool, PoolConfig};
pub use repositories::{
    PgChatRepository, PgDirectMessageRepository, PgInvitationRepository, PgUserRepository,
};
