//! Persona configuration from TOML (`[persona]` section)

use super::lenient;
use serde::{Deserialize, Serialize};
use xuanji_domain::{ConfigIssue, ConfigIssueCode, PromptTemplate};

/// Label shown in front of assistant replies
pub const DEFAULT_ASSISTANT_NAME: &str = "玄机AI命理师";

/// Raw persona configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    /// Overrides the built-in fortune-teller system prompt
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub system_prompt: Option<String>,
    /// Display name for the assistant
    #[serde(deserialize_with = "lenient::string")]
    pub assistant_name: String,
}

impl Default for FilePersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

impl FilePersonaConfig {
    /// Build the prompt template, ignoring a blank override.
    pub fn template(&self) -> PromptTemplate {
        match self.system_prompt.as_deref().map(str::trim) {
            Some(prompt) if !prompt.is_empty() => PromptTemplate::new(prompt),
            _ => PromptTemplate::default(),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Some(prompt) = &self.system_prompt
            && prompt.trim().is_empty()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SuspiciousValue {
                    field: "persona.system_prompt".to_string(),
                    value: prompt.clone(),
                },
                "persona.system_prompt is blank, using the built-in prompt",
            ));
        }
        if self.assistant_name.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SuspiciousValue {
                    field: "persona.assistant_name".to_string(),
                    value: self.assistant_name.clone(),
                },
                "persona.assistant_name is blank",
            ));
        }
        issues
    }
}
