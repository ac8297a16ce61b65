//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account kind chosen at registration.
///
/// Wire format: lowercase string (`"artist"`, `"follower"`), sent as the `type` field.
/// Only artists may upload media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Artist,
    Follower,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Follower => "follower",
        }
    }

    pub fn can_upload(self) -> bool {
        match self {
            Self::Artist => true,
            Self::Follower => false,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as a [`UserRole`].
#[derive(Debug, Error)]
#[error("unknown user role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(Self::Artist),
            "follower" => Ok(Self::Follower),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}
