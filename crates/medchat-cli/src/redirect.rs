use colored::Colorize;
use medchat_core::auth::LoginRedirect;
use std::sync::atomic::{AtomicBool, Ordering};

/// Points the user at the login page and asks the REPL to stop.
pub struct TerminalRedirect {
    base_url: String,
    fired: AtomicBool,
}

impl TerminalRedirect {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fired: AtomicBool::new(false),
        }
    }

    /// True once any redirect was requested.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn login_url(&self, location: &str) -> String {
        format!("{}{}", self.base_url, location)
    }
}

impl LoginRedirect for TerminalRedirect {
    fn redirect(&self, location: &str) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        eprintln!(
            "{}",
            format!(
                "Authentication required. Log in at {} and restart with --token.",
                self.login_url(location)
            )
            .yellow()
        );
    }
}
