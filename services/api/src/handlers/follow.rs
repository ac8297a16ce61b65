use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::follow::{FollowUseCase, UnfollowUseCase};

// ── PUT /api/1/follows/{user_id} ─────────────────────────────────────────────

pub async fn follow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = FollowUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(user.id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/1/follows/{user_id} ──────────────────────────────────────────

pub async fn unfollow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = UnfollowUseCase {
        follows: state.follow_repo(),
    };
    usecase.execute(user.id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
