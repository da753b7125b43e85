//! Submit Query use case.
//!
//! Runs one chat turn: validate the input, send the whole conversation to
//! the assistant, extract the reply and record both sides in the transcript.
//!
//! A turn never fails once the query is accepted. Transport errors and blank
//! replies are replaced by [`UNAVAILABLE_REPLY`]; bodies nothing can be
//! extracted from come back as the domain's parse-failure reply.

use crate::config::BehaviorConfig;
use crate::ports::chat_gateway::{ChatGateway, ChatRequest, GatewayError};
use crate::ports::progress::ProgressNotifier;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use xuanji_domain::util::clip;
use xuanji_domain::{
    ChatMessage, DomainError, Model, PromptTemplate, Query, RawResponse, ReplySource, Transcript,
    extract,
};

/// Assistant message used when the endpoint cannot be reached or says nothing.
pub const UNAVAILABLE_REPLY: &str = "抱歉，我现在无法为您提供咨询服务。请稍后再试。";

/// Errors that can occur before a turn starts.
#[derive(Error, Debug)]
pub enum SubmitQueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] DomainError),
}

/// How the assistant message of a turn was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "source", rename_all = "snake_case")]
pub enum TurnStatus {
    /// The extractor produced the reply (possibly its parse-failure text)
    Answered(ReplySource),
    /// The extractor produced only whitespace
    Blank,
    /// The gateway call failed
    GatewayFailed,
}

impl TurnStatus {
    /// True when the reply came from the endpoint's answer
    pub fn is_answered(&self) -> bool {
        matches!(self, TurnStatus::Answered(source) if *source != ReplySource::Fallback)
    }
}

/// Output of the [`SubmitQueryUseCase`].
#[derive(Debug, Clone, Serialize)]
pub struct SubmitQueryOutput {
    /// The assistant message appended to the transcript
    pub reply: ChatMessage,
    pub status: TurnStatus,
}

/// Use case for submitting one user query.
///
/// Takes the transcript by `&mut`, so a caller cannot start a second turn on
/// the same conversation while one is in flight.
#[derive(Clone)]
pub struct SubmitQueryUseCase {
    gateway: Arc<dyn ChatGateway>,
    template: PromptTemplate,
    model: Model,
    behavior: BehaviorConfig,
}

impl SubmitQueryUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            template: PromptTemplate::default(),
            model: Model::default(),
            behavior: BehaviorConfig::default(),
        }
    }

    /// Use a different persona prompt.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Request a different model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set timeout behavior.
    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Execute one turn.
    ///
    /// On success the transcript has grown by exactly two messages: the user
    /// query followed by the assistant reply. A blank query is rejected and
    /// leaves the transcript untouched.
    pub async fn execute(
        &self,
        transcript: &mut Transcript,
        query: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmitQueryOutput, SubmitQueryError> {
        let query = Query::try_new(query)?;

        info!("Submitting query: {}", clip(query.content(), 100));

        // History is rendered before the new query joins the transcript
        let request = ChatRequest::new(
            self.template.compose(transcript, &query),
            self.template.system_prompt(),
            self.model.clone(),
        );
        debug!(
            session_id = %request.session_id,
            model = %request.model,
            "Prompt is {} bytes over {} prior messages",
            request.content.len(),
            transcript.len()
        );

        progress.on_request_start(query.content());
        transcript.push_user(query.into_content());

        let (text, status) = match self.send(&request).await {
            Ok(raw) => Self::reply_from(&raw),
            Err(e) => {
                warn!("Chat request failed: {}", e);
                (UNAVAILABLE_REPLY.to_string(), TurnStatus::GatewayFailed)
            }
        };

        progress.on_request_end(status.is_answered());
        let reply = transcript.push_assistant(text).clone();

        Ok(SubmitQueryOutput { reply, status })
    }

    async fn send(&self, request: &ChatRequest) -> Result<RawResponse, GatewayError> {
        match self.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.send(request))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => self.gateway.send(request).await,
        }
    }

    fn reply_from(raw: &RawResponse) -> (String, TurnStatus) {
        let extracted = extract(raw);
        debug!(
            "Extracted reply via {:?} from {} byte response",
            extracted.source,
            raw.len()
        );

        if extracted.is_fallback() {
            warn!("Could not extract a reply from {} byte response", raw.len());
        }

        if extracted.text.trim().is_empty() {
            return (UNAVAILABLE_REPLY.to_string(), TurnStatus::Blank);
        }
        (extracted.text, TurnStatus::Answered(extracted.source))
    }
}
