//! Authentication: bearer token access and the login redirect.

use crate::error::Result;
use std::sync::{Arc, RwLock};

/// Persistent storage for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get_token(&self) -> Option<String>;

    /// Replaces the stored token.
    fn set_token(&self, token: &str) -> Result<()>;
}

/// Token store kept in memory only.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: &str) -> Result<()> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }
}

/// Sends the user to the login page.
///
/// A browser front end navigates; the terminal front end prints the URL and
/// stops the REPL.
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, location: &str);
}

/// Central token access plus the uniform 401/403 handling.
pub struct AuthManager {
    store: Arc<dyn TokenStore>,
    redirect: Arc<dyn LoginRedirect>,
    login_path: String,
    return_path: String,
}

impl AuthManager {
    pub fn new(
        store: Arc<dyn TokenStore>,
        redirect: Arc<dyn LoginRedirect>,
        login_path: impl Into<String>,
        return_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            redirect,
            login_path: login_path.into(),
            return_path: return_path.into(),
        }
    }

    /// Returns the current access token.
    pub fn token(&self) -> Option<String> {
        self.store.get_token()
    }

    /// Stores a refreshed access token. Empty tokens are ignored.
    pub fn update_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Ok(());
        }
        self.store.set_token(token)?;
        tracing::info!("Chat: access token updated");
        Ok(())
    }

    /// Returns true for 401/403 and redirects to the login page.
    pub fn check_status(&self, status: u16) -> bool {
        if status == 401 || status == 403 {
            tracing::warn!(status, "Token expired or unauthorized - redirecting to login");
            self.redirect.redirect(&self.expired_location());
            return true;
        }
        false
    }

    /// Returns false and redirects to the login page when no token is stored.
    pub fn validate_token_exists(&self) -> bool {
        match self.token() {
            Some(token) if !token.is_empty() => true,
            _ => {
                tracing::error!("No access token found - redirecting to login");
                self.redirect.redirect(&self.next_location());
                false
            }
        }
    }

    fn expired_location(&self) -> String {
        format!("{}?expired=true", self.login_path)
    }

    fn next_location(&self) -> String {
        format!("{}?next={}", self.login_path, self.return_path)
    }
}
