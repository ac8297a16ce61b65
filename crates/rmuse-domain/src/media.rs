//! Media domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility tier of a medium.
///
/// Stored as a lowercase string. Rows carrying any other value are treated as
/// unreadable by everyone; see [`Permission::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Readable by anyone, including anonymous requesters.
    #[default]
    Public,
    /// Readable by the owner and by users following the owner.
    Follower,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Follower => "follower",
        }
    }

    /// Parse a stored tier. Returns `None` for anything unrecognised.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "follower" => Some(Self::Follower),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
