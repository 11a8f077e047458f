//! Direct message entity <-> model mapper

use recado_core::entities::DirectMessage;
use recado_core::value_objects::Snowflake;

use crate::models::DirectMessageModel;

impl From<DirectMessageModel> for DirectMessage {
    fn from(model: DirectMessageModel) -> Self {
        DirectMessage {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            content: model.content,
            read: model.read,
            created_at: model.created_at,
        }
    }
}
