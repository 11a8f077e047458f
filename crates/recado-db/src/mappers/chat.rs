//! Chat entity <-> model mappers

use recado_core::entities::{Chat, ChatMessage, ChatParticipant};
use recado_core::value_objects::Snowflake;

use crate::models::{ChatMessageModel, ChatModel, ChatParticipantModel};

impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: Snowflake::new(model.id),
            invite_group_id: model.invite_group_id.map(Snowflake::new),
            title: model.title,
            owner_id: Snowflake::new(model.owner_id),
            is_group: model.is_group,
            created_at: model.created_at,
        }
    }
}

impl From<ChatParticipantModel> for ChatParticipant {
    fn from(model: ChatParticipantModel) -> Self {
        ChatParticipant {
            chat_id: Snowflake::new(model.chat_id),
            user_id: Snowflake::new(model.user_id),
        }
    }
}

impl From<ChatMessageModel> for ChatMessage {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessage {
            id: Snowflake::new(model.id),
            chat_id: Snowflake::new(model.chat_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}
