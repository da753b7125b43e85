//! Chat Gateway port
//!
//! Defines the interface for sending one chat turn to the hosted assistant.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use xuanji_domain::{Model, RawResponse, SessionId, VisitorId};

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One outbound chat request.
///
/// The endpoint is stateless, so `content` already holds the persona, the
/// conversation so far and the latest question. Session and visitor ids are
/// fresh for every request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub visitor_id: VisitorId,
    pub content: String,
    pub system_role: String,
    pub model: Model,
}

impl ChatRequest {
    /// Build a request with newly generated ids
    pub fn new(content: impl Into<String>, system_role: impl Into<String>, model: Model) -> Self {
        Self {
            session_id: SessionId::generate(),
            visitor_id: VisitorId::generate(),
            content: content.into(),
            system_role: system_role.into(),
            model,
        }
    }
}

/// Gateway to the hosted assistant
///
/// Implementations (adapters) live in the infrastructure layer. They return
/// the body unparsed; turning it into a reply is the domain's job.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send a request and return the raw response body
    async fn send(&self, request: &ChatRequest) -> Result<RawResponse, GatewayError>;
}
