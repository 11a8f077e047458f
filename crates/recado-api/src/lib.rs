//! # recado-api
//!
//! HTTP API surface: axum handlers, routes, extractors and middleware for
//! the messaging core. All messaging routes live under `/api`, require the
//! `session_token` cookie and answer with a `{"data": ...}` /
//! `{"error": "..."}` envelope.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
