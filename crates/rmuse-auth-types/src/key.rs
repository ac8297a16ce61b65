//! Signing-key source.
//!
//! The key lives in a file whose path is configured at startup. By default the
//! file is re-read on every sign/verify so that rotating the file takes effect
//! without a restart; [`KeySource::preload`] pins the current contents instead.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("cannot read signing key {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("signing key {0} is empty")]
    Empty(PathBuf),
}

/// Where the HMAC signing key comes from.
#[derive(Clone)]
pub enum KeySource {
    /// Read from disk on every call.
    File(PathBuf),
    /// Bytes loaded once.
    Cached(Arc<[u8]>),
}

impl KeySource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn cached(key: impl Into<Arc<[u8]>>) -> Self {
        Self::Cached(key.into())
    }

    /// Current key bytes.
    pub async fn load(&self) -> Result<Arc<[u8]>, KeyError> {
        match self {
            Self::Cached(key) => Ok(Arc::clone(key)),
            Self::File(path) => read_key(path).await,
        }
    }

    /// Read the file once and switch to [`KeySource::Cached`].
    pub async fn preload(self) -> Result<Self, KeyError> {
        let key = self.load().await?;
        Ok(Self::Cached(key))
    }
}

async fn read_key(path: &Path) -> Result<Arc<[u8]>, KeyError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| KeyError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
    if bytes.is_empty() {
        return Err(KeyError::Empty(path.to_path_buf()));
    }
    tracing::trace!(path = %path.display(), "signing key read");
    Ok(bytes.into())
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Cached(_) => f.write_str("Cached(..)"),
        }
    }
}
