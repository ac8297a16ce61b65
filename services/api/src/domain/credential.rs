//! Password hashing and verification.
//!
//! Plaintext passwords only ever live inside [`Password`], which wipes its
//! buffer on drop and has no `Serialize` impl, so it cannot end up in a
//! response body.

use std::fmt;

use anyhow::Context as _;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

use crate::error::ApiError;

/// Submitted plaintext password.
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(Zeroizing::new(plaintext.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn to_zeroizing(&self) -> Zeroizing<String> {
        self.0.clone()
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// bcrypt hasher with a fixed work factor.
///
/// Hashing runs on the blocking pool. Unknown users are checked against a
/// dummy hash of the same cost so both login failure paths take equal time.
pub struct Credentials {
    cost: u32,
    dummy_hash: String,
}

impl Credentials {
    /// Fails if `cost` is outside bcrypt's accepted range.
    pub fn new(cost: u32) -> Result<Self, bcrypt::BcryptError> {
        let dummy_hash = bcrypt::hash("rmuse-timing-equaliser", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &Password) -> Result<String, ApiError> {
        let plaintext = password.to_zeroizing();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await
            .context("join bcrypt hash task")?
            .context("hash password")?;
        Ok(hash)
    }

    /// Check `password` against `hash`. `None` means no such account; the
    /// dummy hash is verified instead and the result is always `false`.
    pub async fn verify(&self, password: &Password, hash: Option<&str>) -> Result<bool, ApiError> {
        let plaintext = password.to_zeroizing();
        let known = hash.is_some();
        let hash = hash.unwrap_or(self.dummy_hash.as_str()).to_owned();
        let result = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext.as_str(), &hash))
            .await
            .context("join bcrypt verify task")?;
        match result {
            Ok(matched) => Ok(matched && known),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                Ok(false)
            }
        }
    }
}
