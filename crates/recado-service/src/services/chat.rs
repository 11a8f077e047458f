//! Group chat service
//!
//! Listing chats and reading/posting chat messages. Non-participants get
//! NotFound rather than a membership hint.

use recado_core::entities::ChatMessage;
use recado_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{ChatMessageResponse, ChatResponse, PostChatMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Most chats listed per user
const CHAT_LIST_LIMIT: i64 = 200;

/// Group chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Chats the user participates in
    #[instrument(skip(self))]
    pub async fn list_chats(&self, user_id: Snowflake) -> ServiceResult<Vec<ChatResponse>> {
        let chats = self
            .ctx
            .chat_repo()
            .find_by_participant(user_id, CHAT_LIST_LIMIT)
            .await?;

        Ok(chats.iter().map(ChatResponse::from).collect())
    }

    /// A single chat by ID. The caller must be a participant.
    #[instrument(skip(self))]
    pub async fn get_chat(
        &self,
        chat_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ChatResponse> {
        self.require_membership(chat_id, user_id).await?;

        let chat = self
            .ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", chat_id.to_string()))?;

        Ok(ChatResponse::from(&chat))
    }

    /// Messages in a chat, oldest first. The caller must be a participant.
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        chat_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<ChatMessageResponse>> {
        self.require_membership(chat_id, user_id).await?;

        let messages = self.ctx.chat_repo().find_messages(chat_id, limit).await?;
        Ok(messages.iter().map(ChatMessageResponse::from).collect())
    }

    /// Post a message into a chat. The caller must be a participant.
    #[instrument(skip(self, request))]
    pub async fn post_message(
        &self,
        chat_id: Snowflake,
        sender_id: Snowflake,
        request: PostChatMessageRequest,
    ) -> ServiceResult<ChatMessageResponse> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Message content is required"));
        }

        self.require_membership(chat_id, sender_id).await?;

        let message = ChatMessage::new(
            self.ctx.generate_id(),
            chat_id,
            sender_id,
            content.to_string(),
        );
        self.ctx.chat_repo().create_message(&message).await?;

        info!(
            message_id = %message.id,
            chat_id = %chat_id,
            sender_id = %sender_id,
            "chat message posted"
        );

        Ok(ChatMessageResponse::from(&message))
    }

    /// Hide the chat from non-participants: both a missing chat and a
    /// membership miss surface as NotFound.
    async fn require_membership(&self, chat_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.chat_repo().is_participant(chat_id, user_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Chat", chat_id.to_string()))
        }
    }
}
