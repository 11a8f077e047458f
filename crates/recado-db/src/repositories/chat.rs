//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recado_core::entities::{Chat, ChatMessage};
use recado_core::traits::{ChatRepository, RepoResult};
use recado_core::value_objects::Snowflake;

use crate::models::{ChatMessageModel, ChatModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(
            r#"
            SELECT id, invite_group_id, title, owner_id, is_group, created_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn find_by_participant(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Chat>> {
        let limit = limit.clamp(1, 200);

        let results = sqlx::query_as::<_, ChatModel>(
            r#"
            SELECT c.id, c.invite_group_id, c.title, c.owner_id, c.is_group, c.created_at
            FROM chats c
            JOIN chat_participants p ON p.chat_id = c.id
            WHERE p.user_id = $1
            ORDER BY c.id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Chat::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_participant(&self, chat_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chat_participants WHERE chat_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(chat_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_messages(&self, chat_id: Snowflake, limit: i64) -> RepoResult<Vec<ChatMessage>> {
        let limit = limit.clamp(1, 500);

        let results = sqlx::query_as::<_, ChatMessageModel>(
            r#"
            SELECT id, chat_id, sender_id, content, created_at
            FROM chat_messages
            WHERE chat_id = $1
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(chat_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatMessage::from).collect())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create_message(&self, message: &ChatMessage) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, chat_id, sender_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.chat_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
