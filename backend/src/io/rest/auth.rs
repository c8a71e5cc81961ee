//! Caller identity extraction.
//!
//! An upstream proxy authenticates the request and forwards the user id in
//! the `x-user-id` header. Handlers that take [`AuthenticatedUser`] reject
//! the request with 401 when the header is missing or names no user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::domain::Identity;
use crate::io::rest::error::ApiError;
use crate::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        let identity = state.user_service.authenticate(user_id).await?;
        Ok(AuthenticatedUser(identity))
    }
}
