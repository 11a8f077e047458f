//! Direct message handlers
//!
//! Endpoints for sending, reading and summarizing direct messages.

use axum::extract::{Path, Query, State};
use recado_service::dto::{
    CountResponse, MessageResponse, SendMessageRequest, SenderSummaryResponse,
};
use recado_service::{MessageService, NotificationService};
use serde::Deserialize;

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created, DataJson};
use crate::state::AppState;

const DEFAULT_RECENT_LIMIT: i64 = 100;
const DEFAULT_CONVERSATION_LIMIT: i64 = 200;

/// Optional `?limit=` query parameter
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Send a direct message
///
/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<DataJson<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let message = service.send(user.user_id, request).await?;
    Ok(Created(DataJson(message)))
}

/// Inbox grouped by sender
///
/// GET /api/messages/inbox
pub async fn inbox_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<DataJson<Vec<SenderSummaryResponse>>> {
    let service = NotificationService::new(state.service_context());
    let summary = service.inbox_bubbles(user.user_id).await?;
    Ok(DataJson(summary))
}

/// Recent received messages, newest first, ungrouped
///
/// GET /api/messages/recent
pub async fn recent_messages(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<LimitQuery>,
) -> ApiResult<DataJson<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service
        .recent(user.user_id, query.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .await?;
    Ok(DataJson(messages))
}

/// Conversation with another user, oldest first. Reading it marks the
/// caller's unread messages from that user read.
///
/// GET /api/messages/conversation/{user_id}
pub async fn conversation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(other_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<DataJson<Vec<MessageResponse>>> {
    let other_id = other_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid user_id format"))?;

    let service = MessageService::new(state.service_context());
    let messages = service
        .conversation(
            user.user_id,
            other_id,
            query.limit.unwrap_or(DEFAULT_CONVERSATION_LIMIT),
        )
        .await?;
    Ok(DataJson(messages))
}

/// Global unread count for the badge
///
/// GET /api/messages/unread_count
pub async fn unread_count(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<DataJson<CountResponse>> {
    let service = NotificationService::new(state.service_context());
    let count = service.unread_badge(user.user_id).await?;
    Ok(DataJson(CountResponse { count }))
}
