//! HTTP client for the messaging API
//!
//! Thin typed wrapper over `reqwest`. Authenticates with the session
//! cookie, unwraps the `{"data": ...}` envelope and maps the summary
//! endpoint's slow-network failures (timeout, refused connection) to an
//! empty inbox so the UI degrades instead of erroring.

use std::time::Duration;

use chrono::{DateTime, Utc};
use recado_core::Snowflake;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::warn;

use crate::store::{LastMessage, Profile, SummaryUpdate};

/// Timeout for inbox summary requests. Past this the poll yields an empty
/// summary and the next tick retries.
pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(7);

const SESSION_COOKIE: &str = "session_token";

/// Errors talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum SyncClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    id: Snowflake,
    full_name: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    id: Snowflake,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WireSenderSummary {
    sender: WireProfile,
    unread: i64,
    last_message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireCount {
    count: i64,
}

/// A message in a fetched conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationMessage {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Authenticated client for the messaging endpoints.
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    session_token: String,
}

impl SyncClient {
    /// Create a client for the given API base URL (e.g.
    /// `http://localhost:8080`) using a session token.
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_token: session_token.into(),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{path}", self.base_url))
            .header(
                header::COOKIE,
                format!("{SESSION_COOKIE}={}", self.session_token),
            )
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, SyncClientError> {
        let status = response.status();
        if status.is_success() {
            let envelope: Envelope<T> = response.json().await?;
            return Ok(envelope.data);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        Err(SyncClientError::Api { status, message })
    }

    /// Fetch the unread inbox summary. Timeouts and connection failures
    /// degrade to an empty summary; HTTP errors still surface.
    pub async fn fetch_inbox(&self) -> Result<Vec<SummaryUpdate>, SyncClientError> {
        let result = self
            .get("/api/messages/inbox")
            .timeout(SUMMARY_TIMEOUT)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_timeout() || e.is_connect() => {
                warn!(error = %e, "inbox summary unreachable, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let rows: Vec<WireSenderSummary> = Self::decode(response).await?;
        Ok(rows
            .into_iter()
            .map(|row| SummaryUpdate {
                profile: Profile {
                    id: row.sender.id,
                    full_name: row.sender.full_name,
                    avatar_url: row.sender.avatar_url,
                },
                unread: row.unread,
                last_message: LastMessage {
                    id: row.last_message.id,
                    content: row.last_message.content,
                    created_at: row.last_message.created_at,
                },
            })
            .collect())
    }

    /// Fetch a conversation with a correspondent. The server marks the
    /// fetched messages read as a side effect.
    pub async fn fetch_conversation(
        &self,
        correspondent: Snowflake,
        limit: u32,
    ) -> Result<Vec<ConversationMessage>, SyncClientError> {
        let response = self
            .get(&format!(
                "/api/messages/conversation/{correspondent}?limit={limit}"
            ))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetch the total unread message count.
    pub async fn fetch_unread_count(&self) -> Result<i64, SyncClientError> {
        let response = self.get("/api/messages/unread_count").send().await?;
        let count: WireCount = Self::decode(response).await?;
        Ok(count.count)
    }

    /// Fetch the pending group-invitation count.
    pub async fn fetch_pending_invitations(&self) -> Result<i64, SyncClientError> {
        let response = self
            .get("/api/chats/invitations/pending_count")
            .send()
            .await?;
        let count: WireCount = Self::decode(response).await?;
        Ok(count.count)
    }
}
