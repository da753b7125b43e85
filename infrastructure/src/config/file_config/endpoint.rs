//! Endpoint configuration from TOML (`[endpoint]` section)

use super::lenient;
use serde::{Deserialize, Serialize};
use xuanji_domain::{ConfigIssue, ConfigIssueCode, Model};

/// Hosted chat endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT_URL: &str = "https://wss.lke.cloud.tencent.com/v1/qbot/chat/sse";

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Full URL requests are POSTed to
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    /// Application key issued for the hosted bot
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub bot_app_key: Option<String>,
    /// Model name forwarded as `model_name`
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub model: Option<String>,
    /// Per-request timeout in seconds; 0 disables it
    pub timeout_secs: Option<u64>,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            bot_app_key: None,
            model: None,
            timeout_secs: None,
        }
    }
}

impl FileEndpointConfig {
    /// The configured key, if it is non-blank
    pub fn bot_app_key(&self) -> Option<&str> {
        self.bot_app_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Parse the model name, falling back to the default model when blank.
    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        match self.model.as_deref() {
            None => (Model::default(), Vec::new()),
            Some(name) if name.trim().is_empty() => (
                Model::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::SuspiciousValue {
                        field: "endpoint.model".to_string(),
                        value: name.to_string(),
                    },
                    format!(
                        "endpoint.model is blank, using '{}' instead",
                        Model::default()
                    ),
                )],
            ),
            Some(name) => {
                let Ok(model) = name.parse::<Model>();
                (model, Vec::new())
            }
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let url = self.url.trim();
        if url.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "endpoint.url".to_string(),
                },
                "endpoint.url is empty",
            ));
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidUrl {
                    field: "endpoint.url".to_string(),
                    value: self.url.clone(),
                },
                format!("endpoint.url must start with http:// or https://, got '{url}'"),
            ));
        }

        if self.bot_app_key().is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "endpoint.bot_app_key".to_string(),
                },
                "endpoint.bot_app_key is not set (use --bot-app-key or XUANJI_BOT_APP_KEY)",
            ));
        }

        issues.extend(self.parse_model().1);
        issues
    }
}
