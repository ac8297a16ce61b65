//! Bearer-token extractors.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use rmuse_auth_types::bearer::bearer_token;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user. Rejects with 401 when the token is absent or invalid.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The authenticated user, or `None` when no token was sent.
///
/// A token or `Authorization` header that is present but invalid is still
/// rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    // Extract synchronously and return a 'static future; see axum-core's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = header_token(&parts.headers);
        let authenticate = state.authenticate();

        async move {
            let token = token?.ok_or(ApiError::Unauthorized)?;
            authenticate.execute(&token).await.map(Self)
        }
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = header_token(&parts.headers);
        let authenticate = state.authenticate();

        async move {
            match token? {
                None => Ok(Self(None)),
                Some(token) => authenticate.execute(&token).await.map(|u| Self(Some(u))),
            }
        }
    }
}

fn header_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    bearer_token(headers).map_err(|e| {
        tracing::debug!(error = %e, "rejecting authorization header");
        ApiError::Unauthorized
    })
}
