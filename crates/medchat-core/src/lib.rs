pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod session;
pub mod translation;
pub mod view;

// Re-export common error type
pub use error::ChatError;
