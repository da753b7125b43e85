//! Application layer for xuanji
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    chat_gateway::{ChatGateway, ChatRequest, GatewayError},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::submit_query::{
    SubmitQueryError, SubmitQueryOutput, SubmitQueryUseCase, TurnStatus, UNAVAILABLE_REPLY,
};
