//! Entity -> response DTO mappers

use recado_core::entities::{Chat, ChatMessage, DirectMessage, User};

use super::responses::{ChatMessageResponse, ChatResponse, MessageResponse, UserProfileResponse};

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            profile_description: user.profile_description.clone(),
            theme: user.theme.clone(),
        }
    }
}

impl From<&DirectMessage> for MessageResponse {
    fn from(message: &DirectMessage) -> Self {
        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            receiver_id: message.receiver_id.to_string(),
            content: message.content.clone(),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

impl From<&Chat> for ChatResponse {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id.to_string(),
            title: chat.title.clone(),
            owner_id: chat.owner_id.to_string(),
            is_group: chat.is_group,
            created_at: chat.created_at,
        }
    }
}

impl From<&ChatMessage> for ChatMessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            chat_id: message.chat_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}
