//! Application layer for MedChat.
//!
//! Coordinates the chat service and the view: session switching, message
//! sending, suggestion chips and on-demand translation.

pub mod chat;
pub mod translation_service;

pub use chat::{ChatController, ChatSettings, ChatState, UiEvent};
pub use translation_service::{TranslationOptions, TranslationService};

#[cfg(test)]
mod testing;
