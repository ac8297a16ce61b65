use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::credential::Password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase};

// ── POST /api/1/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Password,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        credentials: state.credentials.clone(),
        keys: state.keys.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: output.token,
        username: output.username,
    }))
}
