//! Session credential service
//!
//! Issues and verifies the signed, time-limited session token carried in the
//! `session_token` cookie. Verification failures never panic and never leak
//! past `AppError`; the caller decides what "no identity" means (for HTTP
//! routes, a 401).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use recado_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name of the cookie carrying the session credential
pub const SESSION_COOKIE: &str = "session_token";

/// Claims embedded in the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Account email, echoed for convenience
    pub email: String,
    /// Session ID
    pub sid: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub
            .parse::<Snowflake>()
            .map_err(|_| AppError::InvalidSession)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Verified identity extracted from a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Snowflake,
    pub email: String,
}

/// Session token service
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl SessionService {
    /// Create a new session service with the given secret and TTL
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Token lifetime in seconds
    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a signed session token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: Snowflake, email: &str) -> Result<String, AppError> {
        self.issue_with_session(user_id, email, uuid::Uuid::new_v4().to_string())
    }

    fn issue_with_session(
        &self,
        user_id: Snowflake,
        email: &str,
        sid: String,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            sid,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("failed to encode session token")))
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// `SessionExpired` for expired tokens, `InvalidSession` for anything
    /// else (malformed, wrong signature, bad subject).
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::SessionExpired,
                    _ => AppError::InvalidSession,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and return the identity it carries
    ///
    /// # Errors
    /// Same contract as [`Self::decode`].
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.decode(token)?;
        Ok(Identity {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }

    /// Re-issue a fresh token for a still-valid session (refresh on activity).
    /// The session ID is preserved.
    ///
    /// # Errors
    /// Returns an error if the current token fails verification.
    pub fn refresh(&self, token: &str) -> Result<String, AppError> {
        let claims = self.decode(token)?;
        let user_id = claims.user_id()?;
        self.issue_with_session(user_id, &claims.email, claims.sid)
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
