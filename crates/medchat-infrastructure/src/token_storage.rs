//! File-backed bearer token storage.

use crate::paths::MedchatPaths;
use medchat_core::auth::TokenStore;
use medchat_core::error::{ChatError, Result};
use std::fs;
use std::path::PathBuf;

/// Stores the bearer token in a single plaintext file.
///
/// Responsibilities:
/// - Read the token written by a previous login or refresh
/// - Replace it when a refreshed token is pushed in
///
/// Does NOT:
/// - Validate or decode the token
/// - Refresh it (refresh happens outside the client)
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default path (`~/.config/medchat/token`).
    pub fn new() -> Result<Self> {
        let path = MedchatPaths::token_file().map_err(|e| ChatError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}
