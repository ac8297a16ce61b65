use std::sync::Arc;

use anyhow::Context as _;
use uuid::Uuid;

use rmuse_auth_types::key::KeySource;
use rmuse_auth_types::token::{issue_token, verify_token};

use crate::domain::credential::{Credentials, Password};
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, normalize_email};
use crate::error::ApiError;

/// Sign a session token for `user_id` with the current key.
pub async fn issue_session_token(keys: &KeySource, user_id: Uuid) -> Result<String, ApiError> {
    let key = keys.load().await.context("load signing key")?;
    let issued = issue_token(user_id, &key).context("sign session token")?;
    Ok(issued.token)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: Password,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub username: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub credentials: Arc<Credentials>,
    pub keys: KeySource,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Unknown email and wrong password both yield
    /// [`ApiError::InvalidCredentials`] after the same amount of bcrypt work.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let email = normalize_email(&input.email);
        let user = self.users.find_by_email(&email).await?;
        let matched = self
            .credentials
            .verify(&input.password, user.as_ref().map(|u| u.password_hash.as_str()))
            .await?;

        let user = match user {
            Some(user) if matched => user,
            _ => return Err(ApiError::InvalidCredentials),
        };

        let token = issue_session_token(&self.keys, user.id).await?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutput {
            token,
            username: user.username,
        })
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

/// Resolve a bearer token to a live user.
pub struct AuthenticateUseCase<U: UserRepository> {
    pub users: U,
    pub keys: KeySource,
}

impl<U: UserRepository> AuthenticateUseCase<U> {
    /// Every rejection, including a valid token for a user that no longer
    /// exists, is [`ApiError::Unauthorized`]. Only key or storage failures
    /// escape as internal errors.
    pub async fn execute(&self, token: &str) -> Result<User, ApiError> {
        let key = self.keys.load().await.context("load signing key")?;
        let user_id = verify_token(token, &key).map_err(|e| {
            tracing::debug!(reason = %e, "bearer token rejected");
            ApiError::Unauthorized
        })?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}
