//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod endpoint;
mod lenient;
mod output;
mod persona;
mod repl;

pub use endpoint::{DEFAULT_ENDPOINT_URL, FileEndpointConfig};
pub use output::FileOutputConfig;
pub use persona::{DEFAULT_ASSISTANT_NAME, FilePersonaConfig};
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use xuanji_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Hosted endpoint and credentials
    pub endpoint: FileEndpointConfig,
    /// System prompt and display name
    pub persona: FilePersonaConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Run this after command-line overrides have been applied, since a key
    /// passed on the command line satisfies the `bot_app_key` requirement.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.endpoint.validate();
        issues.extend(self.persona.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xuanji_domain::{Model, OutputFormat, has_errors};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[endpoint]
url = "http://localhost:8080/chat"
bot_app_key = "abc123"
model = "hunyuan-pro"
timeout_secs = 30

[persona]
system_prompt = "你是一位紫微斗数专家。"
assistant_name = "紫微先生"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/xuanji/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.url, "http://localhost:8080/chat");
        assert_eq!(config.endpoint.bot_app_key(), Some("abc123"));
        assert_eq!(
            config.endpoint.parse_model().0,
            Model::Custom("hunyuan-pro".to_string())
        );
        assert_eq!(config.endpoint.timeout_secs, Some(30));
        assert_eq!(config.persona.assistant_name, "紫微先生");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[endpoint]
bot_app_key = "abc123"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.persona.assistant_name, DEFAULT_ASSISTANT_NAME);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config_requires_key() {
        let config = FileConfig::default();
        let issues = config.validate();
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let toml_str = r#"
[endpoint]
bot_app_key = "abc123"
retries = 3
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.bot_app_key(), Some("abc123"));
    }
}
