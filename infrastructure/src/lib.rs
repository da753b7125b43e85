//! Infrastructure layer for xuanji
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod lke;

// Re-export commonly used types
pub use config::{
    ConfigLoader, DEFAULT_ASSISTANT_NAME, DEFAULT_ENDPOINT_URL, FileConfig, FileEndpointConfig,
    FileOutputConfig, FilePersonaConfig, FileReplConfig,
};
pub use lke::{LkeChatGateway, LkeError};
