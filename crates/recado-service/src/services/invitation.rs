//! Group chat invitation service
//!
//! Proposals, listing and the accept/reject transition.

use std::collections::HashMap;

use recado_core::entities::{Invitation, InviteGroup};
use recado_core::error::DomainError;
use recado_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{
    ChatResponse, InvitationResponse, ProposeGroupRequest, ProposeGroupResponse,
    RespondOutcomeResponse, UserProfileResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Title used when a proposal arrives without one
const DEFAULT_TITLE: &str = "Group chat";

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

/// Dedup the invitee list, dropping the inviter and the zero ID.
/// First occurrence wins, order preserved.
fn normalize_invitees(inviter_id: Snowflake, invitees: &[Snowflake]) -> Vec<Snowflake> {
    let mut seen = std::collections::HashSet::new();
    invitees
        .iter()
        .copied()
        .filter(|id| id.into_inner() != 0 && *id != inviter_id && seen.insert(*id))
        .collect()
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Propose a group chat: one invite group plus one pending invitation per
    /// invitee
    #[instrument(skip(self, request), fields(invitees = request.invitees.len()))]
    pub async fn propose_group(
        &self,
        inviter_id: Snowflake,
        request: ProposeGroupRequest,
    ) -> ServiceResult<ProposeGroupResponse> {
        let invitees = normalize_invitees(inviter_id, &request.invitees);
        if invitees.is_empty() {
            return Err(ServiceError::validation("At least one invitee is required"));
        }

        let known = self.ctx.user_repo().find_by_ids(&invitees).await?;
        if known.len() != invitees.len() {
            return Err(ServiceError::validation("Unknown invitee"));
        }

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let group = InviteGroup::new(self.ctx.generate_id(), inviter_id, title);
        let invitations: Vec<Invitation> = invitees
            .iter()
            .map(|&invitee| Invitation::new(self.ctx.generate_id(), group.id, invitee))
            .collect();

        self.ctx
            .invitation_repo()
            .create_group(&group, &invitations)
            .await?;

        info!(
            group_id = %group.id,
            inviter_id = %inviter_id,
            invitees = invitations.len(),
            "group chat proposed"
        );

        Ok(ProposeGroupResponse {
            group_id: group.id.to_string(),
            title: group.title,
            invitation_ids: invitations.iter().map(|i| i.id.to_string()).collect(),
        })
    }

    /// Invitations addressed to the user, newest first, with inviter profiles
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        let listed = self.ctx.invitation_repo().find_for_invitee(user_id).await?;

        let inviter_ids: Vec<Snowflake> = listed.iter().map(|i| i.group.inviter_id).collect();
        let inviters: HashMap<Snowflake, UserProfileResponse> = self
            .ctx
            .user_repo()
            .find_by_ids(&inviter_ids)
            .await?
            .iter()
            .map(|user| (user.id, UserProfileResponse::from(user)))
            .collect();

        Ok(listed
            .into_iter()
            .map(|entry| InvitationResponse {
                id: entry.invitation.id.to_string(),
                group_id: entry.group.id.to_string(),
                title: entry.group.title,
                inviter: inviters.get(&entry.group.inviter_id).cloned(),
                status: entry.invitation.status.to_string(),
                created_at: entry.group.created_at,
                responded_at: entry.invitation.responded_at,
            })
            .collect())
    }

    /// Accept or reject an invitation. Only the invitee may respond, and only
    /// once; accepting materializes (or joins) the group's chat.
    #[instrument(skip(self))]
    pub async fn respond(
        &self,
        user_id: Snowflake,
        invitation_id: Snowflake,
        accept: bool,
    ) -> ServiceResult<RespondOutcomeResponse> {
        let invitation = self
            .ctx
            .invitation_repo()
            .find_by_id(invitation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Invitation", invitation_id.to_string()))?;

        if invitation.invitee_id != user_id {
            return Err(DomainError::NotInvitee.into());
        }

        if accept {
            let outcome = self
                .ctx
                .invitation_repo()
                .accept(invitation_id, self.ctx.generate_id())
                .await?;

            info!(
                invitation_id = %invitation_id,
                chat_id = %outcome.chat.id,
                participants = outcome.participant_ids.len(),
                "invitation accepted"
            );

            Ok(RespondOutcomeResponse {
                status: "accepted".to_string(),
                chat: Some(ChatResponse::from(&outcome.chat)),
                participant_ids: outcome
                    .participant_ids
                    .iter()
                    .map(Snowflake::to_string)
                    .collect(),
            })
        } else {
            self.ctx.invitation_repo().reject(invitation_id).await?;

            info!(invitation_id = %invitation_id, "invitation rejected");

            Ok(RespondOutcomeResponse {
                status: "rejected".to_string(),
                chat: None,
                participant_ids: Vec::new(),
            })
        }
    }

    /// Count of the user's pending invitations (badge)
    #[instrument(skip(self))]
    pub async fn pending_count(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.invitation_repo().pending_count(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dedups_preserving_order() {
        let inviter = Snowflake::new(1);
        let ids = vec![
            Snowflake::new(3),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(2),
        ];
        assert_eq!(
            normalize_invitees(inviter, &ids),
            vec![Snowflake::new(3), Snowflake::new(2)]
        );
    }

    #[test]
    fn test_normalize_drops_inviter_and_zero() {
        let inviter = Snowflake::new(1);
        let ids = vec![Snowflake::new(1), Snowflake::new(0), Snowflake::new(2)];
        assert_eq!(normalize_invitees(inviter, &ids), vec![Snowflake::new(2)]);
    }

    #[test]
    fn test_normalize_can_empty_out() {
        let inviter = Snowflake::new(1);
        assert!(normalize_invitees(inviter, &[Snowflake::new(1)]).is_empty());
        assert!(normalize_invitees(inviter, &[]).is_empty());
    }
}
