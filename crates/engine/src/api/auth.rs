//! Caller identity from request headers.
//!
//! The identity provider in front of the engine sets `X-User-Id` (UUID) and
//! `X-User-Role` (`player` | `master`, player when absent).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fichas_domain::UserId;

use crate::api::error::{ApiError, MSG_BAD_TOKEN, MSG_NO_TOKEN};
use crate::use_cases::{Actor, Role};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Authenticated caller extractor.
#[derive(Debug, Clone, Copy)]
pub struct Identity(pub Actor);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id: UserId = header(USER_ID_HEADER)
            .ok_or(ApiError::Unauthorized(MSG_NO_TOKEN))?
            .parse()
            .map_err(|_| ApiError::Unauthorized(MSG_BAD_TOKEN))?;

        let role = match header(USER_ROLE_HEADER) {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| ApiError::Unauthorized(MSG_BAD_TOKEN))?,
            None => Role::Player,
        };

        Ok(Identity(Actor::new(user_id, role)))
    }
}
