//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labelled chat lines
    Text,
    /// JSON with the reply, how it was obtained and the transcript
    Json,
}

impl From<OutputFormat> for xuanji_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => xuanji_domain::OutputFormat::Text,
            OutputFormat::Json => xuanji_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for xuanji
#[derive(Parser, Debug)]
#[command(name = "xuanji")]
#[command(author, version, about = "玄机AI命理师 - Chat with a hosted fortune-telling assistant")]
#[command(long_about = r#"
xuanji sends your questions to a hosted conversational assistant that answers
as a fortune teller. The whole conversation is resent on every turn, so the
assistant remembers what was said earlier in the session.

Configuration files are loaded from (in priority order):
1. XUANJI_* environment variables (e.g. XUANJI_ENDPOINT__BOT_APP_KEY)
2. --config <path>     Explicit config file
3. ./xuanji.toml       Project-level config
4. ~/.config/xuanji/config.toml   Global config

Example:
  xuanji "我今年的事业运势如何？"
  xuanji --bot-app-key <KEY> -o json "最近感情不顺怎么办？"
  xuanji --chat
"#)]
pub struct Cli {
    /// The question to ask (omit to start chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model name sent with each request
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Endpoint URL requests are POSTed to
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Application key of the hosted bot
    #[arg(long, value_name = "KEY", env = "XUANJI_BOT_APP_KEY", hide_env_values = true)]
    pub bot_app_key: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Chat mode is explicit or implied by a missing question
    pub fn is_chat(&self) -> bool {
        self.chat || self.question.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_question() {
        let cli = Cli::try_parse_from(["xuanji", "-o", "json", "-m", "hunyuan-pro", "问事业"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("问事业"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.model.as_deref(), Some("hunyuan-pro"));
        assert!(!cli.is_chat());
    }

    #[test]
    fn test_no_question_means_chat() {
        let cli = Cli::try_parse_from(["xuanji", "-vv", "-q"]).unwrap();
        assert!(cli.is_chat());
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_chat_flag_wins_over_question() {
        let cli = Cli::try_parse_from(["xuanji", "--chat", "你好"]).unwrap();
        assert!(cli.is_chat());
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["xuanji", "-o", "yaml", "q"]).is_err());
    }

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            xuanji_domain::OutputFormat::from(OutputFormat::Json),
            xuanji_domain::OutputFormat::Json
        );
    }
}
