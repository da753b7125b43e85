//! ChatGateway implementation over HTTP

use super::error::{LkeError, Result};
use super::protocol::LkeChatRequest;
use async_trait::async_trait;
use tracing::debug;
use xuanji_application::{ChatGateway, ChatRequest, GatewayError};
use xuanji_domain::{RawResponse, util::clip};

/// Default maximum response body size (5 MB)
pub const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// How much of an error body is kept in the error message
const ERROR_BODY_PREVIEW: usize = 200;

const USER_AGENT: &str = concat!("xuanji/", env!("CARGO_PKG_VERSION"));

/// Gateway that POSTs each turn to the hosted endpoint
pub struct LkeChatGateway {
    client: reqwest::Client,
    endpoint: String,
    bot_app_key: String,
    max_body_size: usize,
}

impl LkeChatGateway {
    /// Create a gateway for `endpoint` authenticated with `bot_app_key`
    pub fn new(endpoint: impl Into<String>, bot_app_key: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        let bot_app_key = bot_app_key.into();

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(LkeError::InvalidEndpoint(endpoint));
        }
        if bot_app_key.trim().is_empty() {
            return Err(LkeError::MissingBotAppKey);
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint,
            bot_app_key,
            max_body_size: MAX_BODY_SIZE,
        })
    }

    /// Reject response bodies larger than `bytes`
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &ChatRequest) -> Result<RawResponse> {
        let body = LkeChatRequest::new(request, &self.bot_app_key);
        debug!(
            endpoint = %self.endpoint,
            session_id = %request.session_id,
            model = %request.model,
            content_len = request.content.len(),
            "Sending chat request"
        );

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LkeError::Status {
                status: status.as_u16(),
                body: clip(&text, ERROR_BODY_PREVIEW).to_string(),
            });
        }

        // Check content length before buffering
        let content_length = response.content_length().unwrap_or(0);
        if content_length > self.max_body_size as u64 {
            return Err(LkeError::BodyTooLarge {
                size: content_length,
                limit: self.max_body_size,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.max_body_size {
            return Err(LkeError::BodyTooLarge {
                size: bytes.len() as u64,
                limit: self.max_body_size,
            });
        }
        let body = String::from_utf8_lossy(&bytes).into_owned();
        debug!(len = body.len(), "Received response body");

        Ok(RawResponse::from_body(body))
    }
}

#[async_trait]
impl ChatGateway for LkeChatGateway {
    async fn send(&self, request: &ChatRequest) -> std::result::Result<RawResponse, GatewayError> {
        self.post(request).await.map_err(GatewayError::from)
    }
}
