//! Route definitions
//!
//! All messaging routes are mounted under /api and require the session
//! cookie; health probes live at the root and are unauthenticated.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{chats, health, messages};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(message_routes())
        .merge(chat_routes())
}

/// Direct message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/send", post(messages::send_message))
        .route("/messages/inbox", get(messages::inbox_summary))
        .route("/messages/recent", get(messages::recent_messages))
        .route(
            "/messages/conversation/:user_id",
            get(messages::conversation),
        )
        .route("/messages/unread_count", get(messages::unread_count))
}

/// Group chat and invitation routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chats", get(chats::list_chats))
        .route("/chats/invite", post(chats::propose_group))
        .route("/chats/invitations", get(chats::list_invitations))
        .route(
            "/chats/invitations/pending_count",
            get(chats::pending_invitation_count),
        )
        .route(
            "/chats/invitations/:invitation_id/respond",
            post(chats::respond_invitation),
        )
        .route("/chats/:chat_id", get(chats::get_chat))
        .route(
            "/chats/:chat_id/messages",
            get(chats::list_chat_messages).post(chats::post_chat_message),
        )
}
