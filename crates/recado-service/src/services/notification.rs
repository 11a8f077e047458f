//! Notification read models
//!
//! Three independently pollable counters/summaries. Each reflects the store
//! at the instant of its own query; no cross-model consistency is promised.

use recado_core::Snowflake;
use tracing::instrument;

use crate::dto::SenderSummaryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::message::MessageService;

/// Notification aggregation service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Global unread direct-message count
    #[instrument(skip(self))]
    pub async fn unread_badge(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.message_repo().unread_count(user_id).await?)
    }

    /// Per-sender inbox summary backing the conversation bubbles
    #[instrument(skip(self))]
    pub async fn inbox_bubbles(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<SenderSummaryResponse>> {
        MessageService::new(self.ctx).summarize_inbox(user_id).await
    }

    /// Count of pending group-chat invitations
    #[instrument(skip(self))]
    pub async fn invitation_badge(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.invitation_repo().pending_count(user_id).await?)
    }
}
