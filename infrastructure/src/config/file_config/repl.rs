//! REPL configuration from TOML (`[repl]` section)

use super::lenient;
use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the spinner while waiting for a reply
    pub show_progress: bool,
    /// Path to the line-editor history file
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}
