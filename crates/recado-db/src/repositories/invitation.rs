//! PostgreSQL implementation of InvitationRepository
//!
//! `accept` is the one multi-step write path in the system and runs inside a
//! single transaction: status flip, idempotent chat materialization and
//! participant inserts either all land or none do.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use recado_core::entities::{Chat, Invitation, InvitationWithGroup, InviteGroup};
use recado_core::error::DomainError;
use recado_core::traits::{AcceptOutcome, InvitationRepository, RepoResult};
use recado_core::value_objects::Snowflake;

use crate::models::{ChatModel, InvitationModel, InvitationWithGroupModel, InviteGroupModel};

use super::error::{
    invitation_not_found, invite_group_not_found, map_db_error, map_unique_violation,
};

/// PostgreSQL implementation of InvitationRepository
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    /// Create a new PgInvitationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip a pending invitation to a terminal status. Zero updated rows
    /// means the invitation was already responded to or never existed.
    async fn transition(
        tx: &mut Transaction<'_, Postgres>,
        invitation_id: Snowflake,
        status: &str,
    ) -> RepoResult<InvitationModel> {
        let updated = sqlx::query_as::<_, InvitationModel>(
            r#"
            UPDATE invitations
            SET status = $2, responded_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING id, group_id, invitee_id, status, responded_at
            "#,
        )
        .bind(invitation_id.into_inner())
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = updated {
            return Ok(model);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM invitations WHERE id = $1)",
        )
        .bind(invitation_id.into_inner())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if exists {
            Err(DomainError::InvitationAlreadyResponded)
        } else {
            Err(invitation_not_found(invitation_id))
        }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self, group, invitations), fields(group_id = %group.id, invitees = invitations.len()))]
    async fn create_group(
        &self,
        group: &InviteGroup,
        invitations: &[Invitation],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO invite_groups (id, inviter_id, title, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(group.id.into_inner())
        .bind(group.inviter_id.into_inner())
        .bind(&group.title)
        .bind(group.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for invitation in invitations {
            sqlx::query(
                r#"
                INSERT INTO invitations (id, group_id, invitee_id, status)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(invitation.id.into_inner())
            .bind(invitation.group_id.into_inner())
            .bind(invitation.invitee_id.into_inner())
            .bind(invitation.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                // UNIQUE (group_id, invitee_id)
                map_unique_violation(e, || {
                    DomainError::ValidationError("Duplicate invitee".to_string())
                })
            })?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r#"
            SELECT id, group_id, invitee_id, status, responded_at
            FROM invitations
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invitation::from))
    }

    #[instrument(skip(self))]
    async fn find_for_invitee(
        &self,
        invitee_id: Snowflake,
    ) -> RepoResult<Vec<InvitationWithGroup>> {
        let results = sqlx::query_as::<_, InvitationWithGroupModel>(
            r#"
            SELECT i.id, i.group_id, i.invitee_id, i.status, i.responded_at,
                   g.inviter_id, g.title, g.created_at AS group_created_at
            FROM invitations i
            JOIN invite_groups g ON g.id = i.group_id
            WHERE i.invitee_id = $1
            ORDER BY i.id DESC
            "#,
        )
        .bind(invitee_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(InvitationWithGroup::from).collect())
    }

    #[instrument(skip(self))]
    async fn pending_count(&self, invitee_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM invitations
            WHERE invitee_id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitee_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn accept(
        &self,
        invitation_id: Snowflake,
        new_chat_id: Snowflake,
    ) -> RepoResult<AcceptOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let invitation = Self::transition(&mut tx, invitation_id, "accepted").await?;
        let group_id = invitation.group_id;

        let group = sqlx::query_as::<_, InviteGroupModel>(
            r#"
            SELECT id, inviter_id, title, created_at
            FROM invite_groups
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| invite_group_not_found(Snowflake::new(group_id)))?;

        // At most one chat per group: the unique index on invite_group_id
        // makes concurrent first-accepts race to a single winner, and the
        // SELECT below reads whichever row won.
        sqlx::query(
            r#"
            INSERT INTO chats (id, invite_group_id, title, owner_id, is_group, created_at)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            ON CONFLICT (invite_group_id) DO NOTHING
            "#,
        )
        .bind(new_chat_id.into_inner())
        .bind(group_id)
        .bind(&group.title)
        .bind(group.inviter_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let chat = sqlx::query_as::<_, ChatModel>(
            r#"
            SELECT id, invite_group_id, title, owner_id, is_group, created_at
            FROM chats
            WHERE invite_group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Membership: the inviter plus everyone whose invitation is accepted
        // at this moment. Re-running is a no-op.
        sqlx::query(
            r#"
            INSERT INTO chat_participants (chat_id, user_id)
            SELECT $1, user_id FROM (
                SELECT inviter_id AS user_id FROM invite_groups WHERE id = $2
                UNION
                SELECT invitee_id FROM invitations WHERE group_id = $2 AND status = 'accepted'
            ) members
            ON CONFLICT (chat_id, user_id) DO NOTHING
            "#,
        )
        .bind(chat.id)
        .bind(group_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let participant_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT user_id FROM chat_participants WHERE chat_id = $1 ORDER BY user_id
            "#,
        )
        .bind(chat.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(AcceptOutcome {
            chat: Chat::from(chat),
            participant_ids: participant_ids.into_iter().map(Snowflake::new).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn reject(&self, invitation_id: Snowflake) -> RepoResult<Invitation> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let model = Self::transition(&mut tx, invitation_id, "rejected").await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(Invitation::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgInvitationRepository>();
    }
}
