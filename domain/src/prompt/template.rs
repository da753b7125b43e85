//! Prompt templates for the chat flow

use crate::core::query::Query;
use crate::session::entities::{Role, Transcript};

/// Label the transcript uses for the user's turns
pub const USER_LABEL: &str = "用户";

/// Label the transcript uses for the assistant's turns
pub const ASSISTANT_LABEL: &str = "命理师";

/// Builds the single `content` string sent to the endpoint.
///
/// The endpoint keeps no conversation state between calls, so every request
/// carries the persona, the full history and the new question:
///
/// ```text
/// <system prompt>
///
/// 用户: ...
/// 命理师: ...
/// 用户: <latest input>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system_prompt: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(Self::default_system_prompt())
    }
}

impl PromptTemplate {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    /// Persona used when none is configured
    pub fn default_system_prompt() -> &'static str {
        "你是一位专业的命理师，结合传统命理学和现代心理学知识，为用户提供人生指导和建议。回答要专业、有深度，同时通俗易懂。"
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn label(role: Role) -> &'static str {
        match role {
            Role::User => USER_LABEL,
            Role::Assistant => ASSISTANT_LABEL,
        }
    }

    /// Render prior turns, one `label: content` line each
    pub fn history(transcript: &Transcript) -> String {
        transcript
            .iter()
            .map(|msg| format!("{}: {}", Self::label(msg.role()), msg.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compose the request content.
    ///
    /// `transcript` must not yet contain `query`.
    pub fn compose(&self, transcript: &Transcript, query: &Query) -> String {
        format!(
            "{}\n\n{}\n{}: {}",
            self.system_prompt,
            Self::history(transcript),
            USER_LABEL,
            query.content()
        )
    }
}
