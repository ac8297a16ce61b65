use uuid::Uuid;

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::validation::ValidationErrors;
use crate::error::ApiError;

// ── Follow ───────────────────────────────────────────────────────────────────

pub struct FollowUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> FollowUseCase<U, F> {
    /// Idempotent: following twice is not an error.
    pub async fn execute(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), ApiError> {
        if follower_id == followed_id {
            return Err(ValidationErrors::single("user_id", "cannot follow yourself").into());
        }
        if self.users.find_by_id(followed_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if self.follows.follow(follower_id, followed_id).await? {
            tracing::info!(%follower_id, %followed_id, "follow created");
        }
        Ok(())
    }
}

// ── Unfollow ─────────────────────────────────────────────────────────────────

pub struct UnfollowUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> UnfollowUseCase<F> {
    pub async fn execute(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), ApiError> {
        if !self.follows.unfollow(follower_id, followed_id).await? {
            return Err(ApiError::FollowNotFound);
        }
        tracing::info!(%follower_id, %followed_id, "follow removed");
        Ok(())
    }
}
