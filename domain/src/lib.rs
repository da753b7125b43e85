//! Domain layer for xuanji
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! A chat session is an append-only [`Transcript`] of [`ChatMessage`]s. The
//! hosted assistant keeps no state between calls, so every request carries
//! the whole transcript, composed by [`PromptTemplate`].
//!
//! ## Reply extraction
//!
//! The endpoint answers with JSON on some calls and with event-stream-shaped
//! text on others. [`extract_reply`] turns any [`RawResponse`] into a display
//! string and never fails.

pub mod config;
pub mod core;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity, has_errors};
pub use core::{error::DomainError, model::Model, query::Query};
pub use prompt::template::{ASSISTANT_LABEL, PromptTemplate, USER_LABEL};
pub use reply::{
    extractor::{ExtractedReply, FALLBACK_REPLY, ReplySource, extract, extract_reply},
    raw::RawResponse,
};
pub use session::{
    entities::{ChatMessage, Role, Transcript},
    identity::{SessionId, VisitorId},
};
