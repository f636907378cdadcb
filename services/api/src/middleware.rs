//! Session token authentication
//!
//! Protected handlers take an [`AuthUser`] argument. Extracting it resolves
//! the request's token to a user, and a failure rejects the request with 401
//! before the handler body runs.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{error::ApiError, models::user::User, state::AppState};

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Extract the session token from the Authorization header.
///
/// Both a bare token and `Bearer <token>` are accepted.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request headers to the user owning the session token
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = extract_token(headers).ok_or_else(ApiError::unauthorized)?;

    let user = state.users.find_by_token(token).await?.ok_or_else(|| {
        warn!("Rejected request with unknown session token");
        ApiError::unauthorized()
    })?;

    Ok(user.into())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await
    }
}
