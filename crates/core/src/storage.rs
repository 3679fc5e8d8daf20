//! Client-local bearer token storage
//!
//! The browser client kept its token in session storage. Here the same role
//! is played by a [`TokenStore`], with an in-memory implementation for tests
//! and embedding, and a file-backed one for the command line.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Where the current bearer token lives between calls
pub trait TokenStore: Send + Sync {
    /// The stored token, if any
    fn get(&self) -> CoreResult<Option<String>>;

    /// Replace the stored token
    fn set(&self, token: &str) -> CoreResult<()>;

    /// Forget the stored token; a no-op when nothing is stored
    fn clear(&self) -> CoreResult<()>;
}

/// Token kept in process memory
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already stored
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> CoreResult<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|_| CoreError::storage_error("token lock poisoned"))?;
        Ok(guard.clone())
    }

    fn set(&self, token: &str) -> CoreResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| CoreError::storage_error("token lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| CoreError::storage_error("token lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Token persisted to a single file, readable only by the owner on Unix
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> CoreResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let token = contents.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    fn set(&self, token: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        debug!("Stored token at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed token at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
