//! Invitation entity <-> model mappers

use recado_core::entities::{Invitation, InvitationStatus, InvitationWithGroup, InviteGroup};
use recado_core::value_objects::Snowflake;

use crate::models::{InvitationModel, InvitationWithGroupModel, InviteGroupModel};

impl From<InviteGroupModel> for InviteGroup {
    fn from(model: InviteGroupModel) -> Self {
        InviteGroup {
            id: Snowflake::new(model.id),
            inviter_id: Snowflake::new(model.inviter_id),
            title: model.title,
            created_at: model.created_at,
        }
    }
}

impl From<InvitationModel> for Invitation {
    fn from(model: InvitationModel) -> Self {
        Invitation {
            id: Snowflake::new(model.id),
            group_id: Snowflake::new(model.group_id),
            invitee_id: Snowflake::new(model.invitee_id),
            // Unknown status strings cannot occur: the column is CHECK-constrained
            status: InvitationStatus::parse(&model.status).unwrap_or(InvitationStatus::Pending),
            responded_at: model.responded_at,
        }
    }
}

impl From<InvitationWithGroupModel> for InvitationWithGroup {
    fn from(model: InvitationWithGroupModel) -> Self {
        InvitationWithGroup {
            invitation: Invitation {
                id: Snowflake::new(model.id),
                group_id: Snowflake::new(model.group_id),
                invitee_id: Snowflake::new(model.invitee_id),
                status: InvitationStatus::parse(&model.status)
                    .unwrap_or(InvitationStatus::Pending),
                responded_at: model.responded_at,
            },
            group: InviteGroup {
                id: Snowflake::new(model.group_id),
                inviter_id: Snowflake::new(model.inviter_id),
                title: model.title,
                created_at: model.group_created_at,
            },
        }
    }
}
