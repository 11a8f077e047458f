//! Group chat handlers
//!
//! Endpoints for proposals, invitations and chat messages.

use axum::extract::{Path, Query, State};
use recado_service::dto::{
    ChatMessageResponse, ChatResponse, CountResponse, InvitationResponse, PostChatMessageRequest,
    ProposeGroupRequest, ProposeGroupResponse, RespondInvitationRequest, RespondOutcomeResponse,
};
use recado_service::{ChatService, InvitationService, NotificationService};
use serde::Deserialize;

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, DataJson};
use crate::state::AppState;

const DEFAULT_MESSAGES_LIMIT: i64 = 200;

/// Optional `?limit=` query parameter
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Propose a group chat
///
/// POST /api/chats/invite
pub async fn propose_group(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<ProposeGroupRequest>,
) -> ApiResult<Created<DataJson<ProposeGroupResponse>>> {
    let service = InvitationService::new(state.service_context());
    let response = service.propose_group(user.user_id, request).await?;
    Ok(Created(DataJson(response)))
}

/// List the caller's invitations
///
/// GET /api/chats/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<DataJson<Vec<InvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let invitations = service.list_for_user(user.user_id).await?;
    Ok(DataJson(invitations))
}

/// Count of the caller's pending invitations (badge)
///
/// GET /api/chats/invitations/pending_count
pub async fn pending_invitation_count(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<DataJson<CountResponse>> {
    let service = NotificationService::new(state.service_context());
    let count = service.invitation_badge(user.user_id).await?;
    Ok(DataJson(CountResponse { count }))
}

/// Accept or reject an invitation
///
/// POST /api/chats/invitations/{invitation_id}/respond
pub async fn respond_invitation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(invitation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RespondInvitationRequest>,
) -> ApiResult<DataJson<RespondOutcomeResponse>> {
    let invitation_id = invitation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid invitation_id format"))?;

    let service = InvitationService::new(state.service_context());
    let outcome = service
        .respond(user.user_id, invitation_id, request.accept)
        .await?;
    Ok(DataJson(outcome))
}

/// List the caller's chats
///
/// GET /api/chats
pub async fn list_chats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<DataJson<Vec<ChatResponse>>> {
    let service = ChatService::new(state.service_context());
    let chats = service.list_chats(user.user_id).await?;
    Ok(DataJson(chats))
}

/// A single chat by ID
///
/// GET /api/chats/{chat_id}
pub async fn get_chat(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(chat_id): Path<String>,
) -> ApiResult<DataJson<ChatResponse>> {
    let chat_id = chat_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))?;

    let service = ChatService::new(state.service_context());
    let chat = service.get_chat(chat_id, user.user_id).await?;
    Ok(DataJson(chat))
}

/// Messages in a chat, oldest first
///
/// GET /api/chats/{chat_id}/messages
pub async fn list_chat_messages(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(chat_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<DataJson<Vec<ChatMessageResponse>>> {
    let chat_id = chat_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))?;

    let service = ChatService::new(state.service_context());
    let messages = service
        .list_messages(
            chat_id,
            user.user_id,
            query.limit.unwrap_or(DEFAULT_MESSAGES_LIMIT),
        )
        .await?;
    Ok(DataJson(messages))
}

/// Post a message into a chat
///
/// POST /api/chats/{chat_id}/messages
pub async fn post_chat_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(chat_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PostChatMessageRequest>,
) -> ApiResult<Created<DataJson<ChatMessageResponse>>> {
    let chat_id = chat_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid chat_id format"))?;

    let service = ChatService::new(state.service_context());
    let message = service.post_message(chat_id, user.user_id, request).await?;
    Ok(Created(DataJson(message)))
}
