//! PostgreSQL implementation of DirectMessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recado_core::entities::DirectMessage;
use recado_core::traits::{DirectMessageRepository, RepoResult};
use recado_core::value_objects::Snowflake;

use crate::models::DirectMessageModel;

use super::error::{is_missing_relation, map_db_error};

/// PostgreSQL implementation of DirectMessageRepository
#[derive(Clone)]
pub struct PgDirectMessageRepository {
    pool: PgPool,
}

impl PgDirectMessageRepository {
    /// Create a new PgDirectMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectMessageRepository for PgDirectMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &DirectMessage) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO direct_messages (id, sender_id, receiver_id, content, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.receiver_id.into_inner())
        .bind(&message.content)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_inbox(
        &self,
        receiver_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<DirectMessage>> {
        let limit = limit.clamp(1, 500);

        let results = sqlx::query_as::<_, DirectMessageModel>(
            r#"
            SELECT id, sender_id, receiver_id, content, read, created_at
            FROM direct_messages
            WHERE receiver_id = $1
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(receiver_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await;

        // The inbox summary degrades to "no data yet" while the schema is
        // still being provisioned.
        match results {
            Ok(rows) => Ok(rows.into_iter().map(DirectMessage::from).collect()),
            Err(e) if is_missing_relation(&e) => Ok(Vec::new()),
            Err(e) => Err(map_db_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn find_conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<DirectMessage>> {
        let limit = limit.clamp(1, 500);

        let results = sqlx::query_as::<_, DirectMessageModel>(
            r#"
            SELECT id, sender_id, receiver_id, content, read, created_at
            FROM direct_messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY id ASC
            LIMIT $3
            "#,
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DirectMessage::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, owner_id: Snowflake, from_user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE direct_messages
            SET read = TRUE
            WHERE receiver_id = $1 AND sender_id = $2 AND read = FALSE
            "#,
        )
        .bind(owner_id.into_inner())
        .bind(from_user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, owner_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM direct_messages
            WHERE receiver_id = $1 AND read = FALSE
            "#,
        )
        .bind(owner_id.into_inner())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(count) => Ok(count),
            Err(e) if is_missing_relation(&e) => Ok(0),
            Err(e) => Err(map_db_error(e)),
        }
    }
}
