//! Chat controller.
//!
//! One `ChatController` owns the state of a chat page: the current
//! session, the cached patient context and the localized welcome text.
//! Its operations are split by concern across the submodules.

mod context;
mod controller;
mod events;
mod messages;
mod sessions;
mod state;

pub use controller::{ChatController, ChatSettings, WELCOME_MESSAGE};
pub use events::UiEvent;
pub use state::ChatState;
