//! `Authorization: Bearer <access token>` extractor

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use recipe_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// The caller, as identified by a valid access token.
///
/// Taking this as a handler argument makes the route require login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

impl AuthUser {
    fn from_token(state: &AppState, token: &str) -> Result<Self, ApiError> {
        // Refresh tokens are rejected here; expiry keeps its own error code
        let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "access token rejected");
            ApiError::App(e)
        })?;

        Ok(Self {
            user_id: claims.user_id()?,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Err(ApiError::MissingAuth);
        };

        Self::from_token(&AppState::from_ref(state), bearer.token())
    }
}
