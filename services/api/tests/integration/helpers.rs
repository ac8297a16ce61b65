use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use rmuse_api::domain::credential::{Credentials, Password};
use rmuse_api::domain::repository::{FollowRepository, MediumRepository, UserRepository};
use rmuse_api::domain::types::{Medium, User};
use rmuse_api::domain::validation::{MediumConflicts, UserConflicts, ValidationErrors};
use rmuse_api::error::ApiError;
use rmuse_auth_types::key::KeySource;
use rmuse_domain::user::UserRole;
use rmuse_testing::auth::TestAuth;

pub const PASSWORD: &str = "correct horse battery staple";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory users. The lock is held across check-and-insert, standing in for
/// the database transaction.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

fn conflicts_in(users: &[User], exclude: Option<Uuid>, email: &str, username: &str) -> UserConflicts {
    let others = || users.iter().filter(|u| Some(u.id) != exclude);
    UserConflicts {
        email_taken: others().any(|u| u.email == email),
        username_taken: others().any(|u| u.username == username),
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_checked<F>(&self, email: &str, username: &str, build: F) -> Result<User, ApiError>
    where
        F: FnOnce(UserConflicts) -> Result<User, ValidationErrors> + Send,
    {
        let mut users = self.users.lock().unwrap();
        let user = build(conflicts_in(&users, None, email, username))?;
        users.push(user.clone());
        Ok(user)
    }

    async fn update_checked<F>(
        &self,
        id: Uuid,
        email: Option<&str>,
        username: Option<&str>,
        build: F,
    ) -> Result<User, ApiError>
    where
        F: FnOnce(User, UserConflicts) -> Result<User, ValidationErrors> + Send,
    {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        let email = email.unwrap_or(stored.email.as_str()).to_owned();
        let username = username.unwrap_or(stored.username.as_str()).to_owned();
        let user = build(stored, conflicts_in(&users, Some(id), &email, &username))?;
        if let Some(slot) = users.iter_mut().find(|u| u.id == id) {
            *slot = user.clone();
        }
        Ok(user)
    }
}

// ── MockMediumRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMediumRepo {
    pub media: Arc<Mutex<Vec<Medium>>>,
}

impl MockMediumRepo {
    pub fn new(media: Vec<Medium>) -> Self {
        Self {
            media: Arc::new(Mutex::new(media)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.media.lock().unwrap().len()
    }
}

impl MediumRepository for MockMediumRepo {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Medium>, ApiError> {
        // Reverse storage order so callers cannot rely on it.
        Ok(self
            .media
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    async fn insert_checked<F>(&self, uri: &str, build: F) -> Result<Medium, ApiError>
    where
        F: FnOnce(MediumConflicts) -> Result<Medium, ValidationErrors> + Send,
    {
        let mut media = self.media.lock().unwrap();
        let medium = build(MediumConflicts {
            uri_taken: media.iter().any(|m| m.uri == uri),
        })?;
        media.push(medium.clone());
        Ok(medium)
    }
}

// ── MockFollowRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockFollowRepo {
    pub edges: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
}

impl MockFollowRepo {
    pub fn new(edges: &[(Uuid, Uuid)]) -> Self {
        Self {
            edges: Arc::new(Mutex::new(edges.iter().copied().collect())),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, follower_id: Uuid, followed_id: Uuid) -> bool {
        self.edges.lock().unwrap().contains(&(follower_id, followed_id))
    }
}

impl FollowRepository for MockFollowRepo {
    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.contains(follower_id, followed_id))
    }

    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.edges.lock().unwrap().insert((follower_id, followed_id)))
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, ApiError> {
        Ok(self.edges.lock().unwrap().remove(&(follower_id, followed_id)))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn credentials() -> Arc<Credentials> {
    Arc::new(Credentials::new(4).unwrap())
}

pub fn keys() -> KeySource {
    TestAuth::default().key_source()
}

/// A stored user whose password is [`PASSWORD`].
pub async fn test_user(username: &str, role: UserRole) -> User {
    let hash = credentials()
        .hash(&Password::new(PASSWORD))
        .await
        .unwrap();
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        role,
        password_hash: hash,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_medium(owner: Uuid, uri: &str, permission: &str) -> Medium {
    let now = Utc::now();
    Medium {
        id: Uuid::now_v7(),
        user_id: owner,
        uri: uri.to_owned(),
        file_type: "image/png".to_owned(),
        permission: permission.to_owned(),
        x: 0,
        y: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Field names of a validation error, or panic.
pub fn validation_fields(err: &ApiError) -> Vec<&'static str> {
    match err {
        ApiError::Validation(errors) => errors.fields(),
        other => panic!("expected Validation, got {other:?}"),
    }
}

/// Messages of a validation error, or panic.
pub fn validation_messages(err: &ApiError) -> Vec<String> {
    match err {
        ApiError::Validation(errors) => errors.as_slice().iter().map(|e| e.message.clone()).collect(),
        other => panic!("expected Validation, got {other:?}"),
    }
}
