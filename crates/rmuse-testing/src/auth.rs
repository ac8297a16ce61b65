//! Token helpers for integration tests.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use rmuse_auth_types::key::KeySource;
use rmuse_auth_types::token::{TOKEN_TTL_SECS, issue_token, issue_token_at};
use uuid::Uuid;

/// Signing key shared by service tests.
pub const TEST_KEY: &[u8] = b"rmuse-test-signing-key";

/// Issues tokens signed with a fixed key.
pub struct TestAuth {
    pub key: Vec<u8>,
}

impl Default for TestAuth {
    fn default() -> Self {
        Self::new(TEST_KEY)
    }
}

impl TestAuth {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    /// Key source matching this helper's key.
    pub fn key_source(&self) -> KeySource {
        KeySource::cached(self.key.clone())
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        issue_token(user_id, &self.key).unwrap().token
    }

    /// A correctly signed token that expired an hour ago.
    pub fn expired_token_for(&self, user_id: Uuid) -> String {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        issue_token_at(user_id, &self.key, now - TOKEN_TTL_SECS - 3600)
            .unwrap()
            .token
    }

    /// `Authorization: Bearer <token>` for `user_id`.
    pub fn headers_for(&self, user_id: Uuid) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token_for(user_id))).unwrap(),
        );
        map
    }
}
