//! Chat session domain.
//!
//! - [`entities::ChatMessage`]: a single turn in the conversation
//! - [`entities::Transcript`]: the append-only list of turns
//! - [`identity::SessionId`] / [`identity::VisitorId`]: per-request ids

pub mod entities;
pub mod identity;
