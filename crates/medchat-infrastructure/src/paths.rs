//! Unified path management for medchat files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/medchat/           # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── token                    # Bearer token
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct MedchatPaths;

impl MedchatPaths {
    /// Returns the medchat configuration directory (e.g. `~/.config/medchat/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("medchat"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the token file.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token in plaintext; it is written with 600
    /// permissions on Unix.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token"))
    }
}
