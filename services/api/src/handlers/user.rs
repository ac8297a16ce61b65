use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::credential::Password;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::user::{
    RegisterInput, RegisterUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

/// Public representation of a user. Carries no password material.
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "type")]
    pub role: String,
    #[serde(serialize_with = "rmuse_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "rmuse_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email,
            username: user.username,
            firstname: user.first_name,
            lastname: user.last_name,
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /api/1/user ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "type")]
    pub role: String,
    #[serde(default)]
    pub password: Password,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserResponse,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        credentials: state.credentials.clone(),
        keys: state.keys.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            email: body.email,
            username: body.username,
            first_name: body.firstname,
            last_name: body.lastname,
            role: body.role,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token: output.token,
            user: output.user.into(),
        }),
    ))
}

// ── GET /api/1/user ──────────────────────────────────────────────────────────

pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

// ── PATCH /api/1/user ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Password,
    pub new_password: Option<Password>,
}

pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
        credentials: state.credentials.clone(),
    };
    let updated = usecase
        .execute(
            user,
            body.password,
            UpdateProfileInput {
                email: body.email,
                username: body.username,
                first_name: body.firstname,
                last_name: body.lastname,
                role: body.role,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}
