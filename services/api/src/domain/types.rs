use chrono::{DateTime, Utc};
use uuid::Uuid;

use rmuse_domain::media::Permission;
use rmuse_domain::user::UserRole;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Always lowercase; see [`normalize_email`].
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// bcrypt hash. Never leaves the service.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Uploaded file metadata.
#[derive(Debug, Clone)]
pub struct Medium {
    pub id: Uuid,
    /// Uploader. Weak reference; the user row may be gone.
    pub user_id: Uuid,
    pub uri: String,
    pub file_type: String,
    /// Stored tier as written. Use [`Medium::tier`] for access decisions.
    pub permission: String,
    pub x: i32,
    pub y: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medium {
    /// Recognised visibility tier, or `None` for anything unknown.
    pub fn tier(&self) -> Option<Permission> {
        Permission::parse(&self.permission)
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
