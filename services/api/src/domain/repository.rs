#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Medium, User};
use crate::domain::validation::{MediumConflicts, UserConflicts, ValidationErrors};
use crate::error::ApiError;

/// Repository for user accounts.
///
/// The `*_checked` writes look up conflicts, hand them to `build`, and persist
/// what it returns as one atomic unit. A concurrent writer that wins the race
/// surfaces as the matching field error, never as a duplicate row.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;

    /// `email` must be normalised.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    async fn insert_checked<F>(&self, email: &str, username: &str, build: F) -> Result<User, ApiError>
    where
        F: FnOnce(UserConflicts) -> Result<User, ValidationErrors> + Send;

    /// Re-reads user `id` inside the write, locked against concurrent
    /// updates, and hands it to `build` with the conflicts for the resulting
    /// email and username. `None` keeps the stored value; a vanished user is
    /// [`ApiError::Unauthorized`].
    async fn update_checked<F>(
        &self,
        id: Uuid,
        email: Option<&str>,
        username: Option<&str>,
        build: F,
    ) -> Result<User, ApiError>
    where
        F: FnOnce(User, UserConflicts) -> Result<User, ValidationErrors> + Send;
}

/// Repository for uploaded media.
pub trait MediumRepository: Send + Sync {
    /// Rows for whichever `ids` exist, in no particular order.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Medium>, ApiError>;

    async fn insert_checked<F>(&self, uri: &str, build: F) -> Result<Medium, ApiError>
    where
        F: FnOnce(MediumConflicts) -> Result<Medium, ValidationErrors> + Send;
}

/// Repository for the directed follow graph.
pub trait FollowRepository: Send + Sync {
    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError>;

    /// Returns `true` if the edge was created, `false` if it already existed.
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError>;

    /// Returns `true` if an edge was removed.
    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError>;
}
