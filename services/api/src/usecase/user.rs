use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use rmuse_auth_types::key::KeySource;

use crate::domain::credential::{Credentials, Password};
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, normalize_email};
use crate::domain::validation::validate_user;
use crate::error::ApiError;
use crate::usecase::session::issue_session_token;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub password: Password,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub credentials: Arc<Credentials>,
    pub keys: KeySource,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput, ApiError> {
        // Hash before the transaction opens; bcrypt is the slow part.
        let password_hash = self.credentials.hash(&input.password).await?;
        drop(input.password);

        let email = normalize_email(&input.email);
        let username = input.username;
        let user = self
            .users
            .insert_checked(&email, &username, |conflicts| {
                let role = validate_user(&email, &username, &input.role, conflicts)?;
                let now = Utc::now();
                Ok(User {
                    id: Uuid::now_v7(),
                    email: email.clone(),
                    username: username.clone(),
                    first_name: input.first_name,
                    last_name: input.last_name,
                    role,
                    password_hash,
                    created_at: now,
                    updated_at: now,
                })
            })
            .await?;

        let token = issue_session_token(&self.keys, user.id).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(RegisterOutput { token, user })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Absent fields keep their current value.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub new_password: Option<Password>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
    pub credentials: Arc<Credentials>,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    /// `password` must match the acting user's current password; a mismatch
    /// is [`ApiError::Unauthorized`].
    pub async fn execute(
        &self,
        current: User,
        password: Password,
        input: UpdateProfileInput,
    ) -> Result<User, ApiError> {
        let confirmed = self
            .credentials
            .verify(&password, Some(current.password_hash.as_str()))
            .await?;
        if !confirmed {
            return Err(ApiError::Unauthorized);
        }

        let new_hash = match input.new_password.filter(|p| !p.is_empty()) {
            Some(new_password) => Some(self.credentials.hash(&new_password).await?),
            None => None,
        };

        let email = input.email.map(|e| normalize_email(&e));
        let username = input.username;
        let (first_name, last_name, role) = (input.first_name, input.last_name, input.role);

        // Unchanged fields come from the row as stored at write time.
        let user = self
            .users
            .update_checked(current.id, email.as_deref(), username.as_deref(), |stored, conflicts| {
                let email = email.clone().unwrap_or_else(|| stored.email.clone());
                let username = username.clone().unwrap_or_else(|| stored.username.clone());
                let role = role.unwrap_or_else(|| stored.role.as_str().to_owned());
                let role = validate_user(&email, &username, &role, conflicts)?;
                Ok(User {
                    id: stored.id,
                    email,
                    username,
                    first_name: first_name.unwrap_or(stored.first_name),
                    last_name: last_name.unwrap_or(stored.last_name),
                    role,
                    password_hash: new_hash.unwrap_or(stored.password_hash),
                    created_at: stored.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }
}
