//! Session authentication extractor
//!
//! Extracts and verifies the session token carried in the `session_token`
//! cookie. This is the only place "no identity" becomes a 401.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use recado_common::auth::SESSION_COOKIE;
use recado_common::AppError;
use recado_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the session cookie
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID from the session token
    pub user_id: Snowflake,
    /// Account email from the session token
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::App(AppError::MissingSession))?;

        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(ApiError::App(AppError::MissingSession))?;

        let app_state = AppState::from_ref(state);
        let identity = app_state
            .session_service()
            .verify(cookie.value())
            .map_err(|e| {
                tracing::warn!(error = %e, "session verification failed");
                ApiError::App(e)
            })?;

        Ok(CurrentUser {
            user_id: identity.user_id,
            email: identity.email,
        })
    }
}
