//! Direct message service
//!
//! Sending, inbox summaries, conversations and the unread badge.

use std::collections::HashMap;

use recado_core::entities::DirectMessage;
use recado_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, SendMessageRequest, SenderSummaryResponse, UserProfileResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Number of received messages scanned when grouping the inbox by sender.
/// Unread counts in the summary are bounded by this window.
const INBOX_WINDOW: i64 = 500;

/// Direct message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

/// One grouped inbox row before profile enrichment
struct SenderGroup {
    unread: i64,
    last_message: DirectMessage,
}

/// Group a newest-first inbox scan by sender: latest message per sender plus
/// that sender's unread count within the scan.
fn group_by_sender(inbox: Vec<DirectMessage>) -> Vec<(Snowflake, SenderGroup)> {
    let mut order: Vec<Snowflake> = Vec::new();
    let mut groups: HashMap<Snowflake, SenderGroup> = HashMap::new();

    for message in inbox {
        match groups.get_mut(&message.sender_id) {
            Some(group) => {
                if !message.read {
                    group.unread += 1;
                }
            }
            None => {
                order.push(message.sender_id);
                let unread = i64::from(!message.read);
                groups.insert(
                    message.sender_id,
                    SenderGroup {
                        unread,
                        last_message: message,
                    },
                );
            }
        }
    }

    order
        .into_iter()
        .filter_map(|sender| groups.remove(&sender).map(|g| (sender, g)))
        .collect()
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a direct message
    #[instrument(skip(self, request), fields(to = %request.to))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let content = request.content.trim();
        if content.is_empty() {
            return Err(ServiceError::validation("Message content is required"));
        }
        if request.to.into_inner() == 0 {
            return Err(ServiceError::validation("Receiver is required"));
        }
        if request.to == sender_id {
            return Err(ServiceError::validation("Cannot message yourself"));
        }

        self.ctx
            .user_repo()
            .find_by_id(request.to)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.to.to_string()))?;

        let message = DirectMessage::new(
            self.ctx.generate_id(),
            sender_id,
            request.to,
            content.to_string(),
        );
        self.ctx.message_repo().create(&message).await?;

        info!(
            message_id = %message.id,
            sender_id = %sender_id,
            receiver_id = %request.to,
            "direct message sent"
        );

        Ok(MessageResponse::from(&message))
    }

    /// Most recent messages addressed to the user, newest first, ungrouped
    #[instrument(skip(self))]
    pub async fn recent(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let inbox = self.ctx.message_repo().find_inbox(user_id, limit).await?;
        Ok(inbox.iter().map(MessageResponse::from).collect())
    }

    /// Inbox grouped by sender: latest message and windowed unread count per
    /// sender, with sender profiles batch-fetched. Senders whose account row
    /// is missing are dropped from the summary.
    #[instrument(skip(self))]
    pub async fn summarize_inbox(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<SenderSummaryResponse>> {
        let inbox = self
            .ctx
            .message_repo()
            .find_inbox(user_id, INBOX_WINDOW)
            .await?;

        let grouped = group_by_sender(inbox);
        let sender_ids: Vec<Snowflake> = grouped.iter().map(|(id, _)| *id).collect();

        let profiles: HashMap<Snowflake, UserProfileResponse> = self
            .ctx
            .user_repo()
            .find_by_ids(&sender_ids)
            .await?
            .iter()
            .map(|user| (user.id, UserProfileResponse::from(user)))
            .collect();

        Ok(grouped
            .into_iter()
            .filter_map(|(sender_id, group)| {
                profiles.get(&sender_id).map(|profile| SenderSummaryResponse {
                    sender: profile.clone(),
                    unread: group.unread,
                    last_message: MessageResponse::from(&group.last_message),
                })
            })
            .collect())
    }

    /// The conversation between the user and another user, oldest first.
    /// Reading it marks the user's unread messages from the other party read.
    #[instrument(skip(self))]
    pub async fn conversation(
        &self,
        user_id: Snowflake,
        other_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self
            .ctx
            .message_repo()
            .find_conversation(user_id, other_id, limit)
            .await?;

        let transitioned = self.ctx.message_repo().mark_read(user_id, other_id).await?;
        if transitioned > 0 {
            info!(
                user_id = %user_id,
                from = %other_id,
                count = transitioned,
                "messages marked read"
            );
        }

        Ok(messages.iter().map(MessageResponse::from).collect())
    }

    /// Global unread count for the badge
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.message_repo().unread_count(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: i64, sender: i64, read: bool) -> DirectMessage {
        DirectMessage {
            id: Snowflake::new(id),
            sender_id: Snowflake::new(sender),
            receiver_id: Snowflake::new(999),
            content: format!("msg {id}"),
            read,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_grouping_keeps_newest_first_sender_order() {
        // Newest first: sender 2, then 1, then 2 again
        let inbox = vec![msg(30, 2, false), msg(20, 1, false), msg(10, 2, true)];
        let grouped = group_by_sender(inbox);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, Snowflake::new(2));
        assert_eq!(grouped[1].0, Snowflake::new(1));
    }

    #[test]
    fn test_grouping_takes_latest_message_per_sender() {
        let inbox = vec![msg(30, 1, false), msg(20, 1, false), msg(10, 1, true)];
        let grouped = group_by_sender(inbox);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].1.last_message.id, Snowflake::new(30));
    }

    #[test]
    fn test_grouping_counts_unread_within_window() {
        let inbox = vec![
            msg(40, 1, false),
            msg(30, 2, true),
            msg(20, 1, false),
            msg(10, 1, true),
        ];
        let grouped = group_by_sender(inbox);

        let sender1 = grouped.iter().find(|(s, _)| *s == Snowflake::new(1)).unwrap();
        let sender2 = grouped.iter().find(|(s, _)| *s == Snowflake::new(2)).unwrap();
        assert_eq!(sender1.1.unread, 2);
        assert_eq!(sender2.1.unread, 0);
    }

    #[test]
    fn test_grouping_empty_inbox() {
        assert!(group_by_sender(Vec::new()).is_empty());
    }
}
