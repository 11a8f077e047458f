//! Integration test utilities for the messaging server
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API: spawning a server, seeding users and issuing session cookies.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
