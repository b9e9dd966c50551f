pub mod config_service;
pub mod dto;
pub mod http_api;
pub mod paths;
pub mod token_storage;

pub use crate::config_service::ConfigService;
pub use crate::http_api::HttpChatApi;
pub use crate::token_storage::FileTokenStore;
