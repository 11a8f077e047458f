//! Data transfer objects

mod mappers;
mod requests;
mod responses;

pub use requests::{
    PostChatMessageRequest, ProposeGroupRequest, RespondInvitationRequest, SendMessageRequest,
};
pub use responses::{
    ApiResponse, ChatMessageResponse, ChatResponse, CountResponse, InvitationResponse,
    MessageResponse, ProposeGroupResponse, RespondOutcomeResponse, SenderSummaryResponse,
    UserProfileResponse,
};
