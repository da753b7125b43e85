//! Adapter for the hosted knowledge-engine chat endpoint
//!
//! The endpoint takes a single JSON POST per turn and answers with either a
//! JSON document or a block of event-stream frames, even with streaming
//! disabled. The adapter only moves bytes; reply extraction happens in the
//! domain layer.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::{LkeError, Result};
pub use gateway::LkeChatGateway;
pub use protocol::{LkeChatRequest, StreamMode};
