//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the migrations applied
//! - Environment variables: DATABASE_URL, SESSION_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_requests_without_session_are_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/messages/inbox").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ErrorEnvelope = response.json().await.unwrap();
    assert!(!body.error.is_empty());
}

// ============================================================================
// Direct Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_read_conversation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();

    let request = SendMessageRequest::to(bob.id, "hello bob");
    let response = server.post_as("/api/messages/send", &alice, &request).await.unwrap();
    let sent: DataEnvelope<MessageBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(sent.data.content, "hello bob");
    assert!(!sent.data.read);

    // Bob's badge sees one unread message.
    let response = server.get_as("/api/messages/unread_count", &bob).await.unwrap();
    let count: DataEnvelope<CountBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 1);

    // Reading the conversation returns the message and marks it read.
    let path = format!("/api/messages/conversation/{}", alice.id);
    let response = server.get_as(&path, &bob).await.unwrap();
    let conversation: DataEnvelope<Vec<MessageBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversation.data.len(), 1);
    assert_eq!(conversation.data[0].content, "hello bob");

    let response = server.get_as("/api/messages/unread_count", &bob).await.unwrap();
    let count: DataEnvelope<CountBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.data.count, 0);
}

#[tokio::test]
async fn test_sending_to_yourself_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();

    let request = SendMessageRequest::to(alice.id, "note to self");
    let response = server.post_as("/api/messages/send", &alice, &request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sending_empty_content_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();

    let request = SendMessageRequest::to(bob.id, "   ");
    let response = server.post_as("/api/messages/send", &alice, &request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inbox_groups_unread_by_sender() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();
    let carol = server.seed_user().await.unwrap();

    for content in ["first", "second"] {
        let request = SendMessageRequest::to(carol.id, content);
        server.post_as("/api/messages/send", &alice, &request).await.unwrap();
    }
    let request = SendMessageRequest::to(carol.id, "from bob");
    server.post_as("/api/messages/send", &bob, &request).await.unwrap();

    let response = server.get_as("/api/messages/inbox", &carol).await.unwrap();
    let inbox: DataEnvelope<Vec<SenderSummaryBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(inbox.data.len(), 2);
    // Newest sender first.
    assert_eq!(inbox.data[0].sender.id, bob.id.to_string());
    assert_eq!(inbox.data[0].unread, 1);
    assert_eq!(inbox.data[0].last_message.content, "from bob");
    assert_eq!(inbox.data[1].sender.id, alice.id.to_string());
    assert_eq!(inbox.data[1].unread, 2);
    assert_eq!(inbox.data[1].last_message.content, "second");
}

// ============================================================================
// Invitation and Group Chat Tests
// ============================================================================

#[tokio::test]
async fn test_group_invitation_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();
    let carol = server.seed_user().await.unwrap();

    // Alice proposes a group with Bob and Carol.
    let request = ProposeGroupRequest::new("Weekend trip", &[bob.id, carol.id]);
    let response = server.post_as("/api/chats/invite", &alice, &request).await.unwrap();
    let proposed: DataEnvelope<ProposeGroupBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(proposed.data.title, "Weekend trip");
    assert_eq!(proposed.data.invitation_ids.len(), 2);

    // Bob sees a pending invitation.
    let response = server.get_as("/api/chats/invitations", &bob).await.unwrap();
    let invitations: DataEnvelope<Vec<InvitationBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let invitation = invitations
        .data
        .iter()
        .find(|inv| inv.group_id == proposed.data.group_id)
        .expect("invitation should be listed");
    assert_eq!(invitation.status, "pending");
    assert_eq!(invitation.title, "Weekend trip");
    assert_eq!(
        invitation.inviter.as_ref().map(|p| p.id.clone()),
        Some(alice.id.to_string())
    );

    let response = server
        .get_as("/api/chats/invitations/pending_count", &bob)
        .await
        .unwrap();
    let count: DataEnvelope<CountBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(count.data.count >= 1);

    // Bob accepts: a chat materializes with Alice and Bob.
    let path = format!("/api/chats/invitations/{}/respond", invitation.id);
    let response = server
        .post_as(&path, &bob, &RespondRequest { accept: true })
        .await
        .unwrap();
    let outcome: DataEnvelope<RespondOutcomeBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.data.status, "accepted");
    let chat = outcome.data.chat.expect("accept should return the chat");
    assert!(chat.is_group);
    assert!(outcome.data.participant_ids.contains(&alice.id.to_string()));
    assert!(outcome.data.participant_ids.contains(&bob.id.to_string()));

    // Carol accepts the same group: she joins the existing chat.
    let response = server.get_as("/api/chats/invitations", &carol).await.unwrap();
    let invitations: DataEnvelope<Vec<InvitationBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let carol_invitation = invitations
        .data
        .iter()
        .find(|inv| inv.group_id == proposed.data.group_id)
        .expect("invitation should be listed");

    let path = format!("/api/chats/invitations/{}/respond", carol_invitation.id);
    let response = server
        .post_as(&path, &carol, &RespondRequest { accept: true })
        .await
        .unwrap();
    let outcome: DataEnvelope<RespondOutcomeBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let carol_chat = outcome.data.chat.expect("accept should return the chat");
    assert_eq!(carol_chat.id, chat.id);
    assert_eq!(outcome.data.participant_ids.len(), 3);

    // Responding twice conflicts.
    let path = format!("/api/chats/invitations/{}/respond", invitation.id);
    let response = server
        .post_as(&path, &bob, &RespondRequest { accept: true })
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: ErrorEnvelope = response.json().await.unwrap();
    assert!(!body.error.is_empty());
}

#[tokio::test]
async fn test_rejecting_an_invitation_creates_no_chat() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();

    let request = ProposeGroupRequest::new("Declined plans", &[bob.id]);
    let response = server.post_as("/api/chats/invite", &alice, &request).await.unwrap();
    let proposed: DataEnvelope<ProposeGroupBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!(
        "/api/chats/invitations/{}/respond",
        proposed.data.invitation_ids[0]
    );
    let response = server
        .post_as(&path, &bob, &RespondRequest { accept: false })
        .await
        .unwrap();
    let outcome: DataEnvelope<RespondOutcomeBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.data.status, "rejected");
    assert!(outcome.data.chat.is_none());
}

#[tokio::test]
async fn test_only_the_invitee_may_respond() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();
    let mallory = server.seed_user().await.unwrap();

    let request = ProposeGroupRequest::new("Private", &[bob.id]);
    let response = server.post_as("/api/chats/invite", &alice, &request).await.unwrap();
    let proposed: DataEnvelope<ProposeGroupBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!(
        "/api/chats/invitations/{}/respond",
        proposed.data.invitation_ids[0]
    );
    let response = server
        .post_as(&path, &mallory, &RespondRequest { accept: true })
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Chat Message Tests
// ============================================================================

#[tokio::test]
async fn test_chat_messages_flow_between_participants() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.seed_user().await.unwrap();
    let bob = server.seed_user().await.unwrap();
    let outsider = server.seed_user().await.unwrap();

    // Build a chat via the invitation flow.
    let request = ProposeGroupRequest::new("Chatter", &[bob.id]);
    let response = server.post_as("/api/chats/invite", &alice, &request).await.unwrap();
    let proposed: DataEnvelope<ProposeGroupBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!(
        "/api/chats/invitations/{}/respond",
        proposed.data.invitation_ids[0]
    );
    let response = server
        .post_as(&path, &bob, &RespondRequest { accept: true })
        .await
        .unwrap();
    let outcome: DataEnvelope<RespondOutcomeBody> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let chat = outcome.data.chat.unwrap();

    // Both participants post; history comes back oldest first.
    let messages_path = format!("/api/chats/{}/messages", chat.id);
    let request = PostChatMessageRequest {
        content: "hi all".to_string(),
    };
    let response = server.post_as(&messages_path, &alice, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let request = PostChatMessageRequest {
        content: "hey".to_string(),
    };
    let response = server.post_as(&messages_path, &bob, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_as(&messages_path, &alice).await.unwrap();
    let history: DataEnvelope<Vec<ChatMessageBody>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.data.len(), 2);
    assert_eq!(history.data[0].content, "hi all");
    assert_eq!(history.data[1].content, "hey");

    // Chat shows up in the participants' chat lists.
    let response = server.get_as("/api/chats", &bob).await.unwrap();
    let chats: DataEnvelope<Vec<ChatBody>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(chats.data.iter().any(|c| c.id == chat.id));

    // Participants can fetch the chat by ID.
    let chat_path = format!("/api/chats/{}", chat.id);
    let response = server.get_as(&chat_path, &alice).await.unwrap();
    let fetched: DataEnvelope<ChatBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.data.id, chat.id);
    assert_eq!(fetched.data.title, "Chatter");

    // Non-participants cannot see the chat exists.
    let response = server.get_as(&chat_path, &outsider).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.get_as(&messages_path, &outsider).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = PostChatMessageRequest {
        content: "let me in".to_string(),
    };
    let response = server.post_as(&messages_path, &outsider, &request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
