//! Session domain module.
//!
//! This module contains the session and message models exchanged with the
//! chat API.
//!
//! # Module Structure
//!
//! - `model`: Session list entries and loaded history (`SessionSummary`, `SessionHistory`)
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//!
//! # Usage
//!
//! ```ignore
//! use medchat_core::session::{SessionSummary, SessionHistory};
//! use medchat_core::session::{MessageRole, ConversationMessage};
//! ```

mod message;
mod model;

// Re-export public API
pub use message::{ConversationMessage, MessageRole};
pub use model::{SessionHistory, SessionSummary, UNTITLED_SESSION};
