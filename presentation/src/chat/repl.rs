//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::warn;
use xuanji_application::{NoProgress, ProgressNotifier, SubmitQueryUseCase};
use xuanji_domain::Transcript;

/// Greeting shown as the assistant's first line
const GREETING: &str = "您好！我是玄机AI命理师，可以为您解答命理、运势、人生规划等方面的问题。请问有什么可以帮您？";

/// Result of a slash command
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Continue,
    Quit,
}

/// Interactive chat REPL
///
/// Owns the conversation transcript for the lifetime of the session.
pub struct ChatRepl {
    use_case: SubmitQueryUseCase,
    formatter: ConsoleFormatter,
    config: ReplConfig,
    transcript: Transcript,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: SubmitQueryUseCase, formatter: ConsoleFormatter) -> Self {
        Self {
            use_case,
            formatter,
            config: ReplConfig::default(),
            transcript: Transcript::new(),
        }
    }

    /// Set REPL configuration
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the interactive REPL
    ///
    /// `initial` is submitted as the first question before prompting.
    pub async fn run(&mut self, initial: Option<String>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = self.config.history_path();

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(question) = initial {
            self.process_query(&question).await;
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) == Command::Quit {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_query(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("再见！");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path
            && let Err(e) = rl.save_history(path)
        {
            warn!("Failed to save history to {}: {}", path.display(), e);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::header("玄机AI命理师 - 对话模式"));
        println!();
        println!("Model: {}", self.use_case.model());
        println!();
        Self::print_commands();
        println!(
            "{} {}",
            format!("{}:", self.formatter.assistant_name()).yellow().bold(),
            GREETING
        );
        println!();
    }

    fn print_commands() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /clear            - Start a new conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&mut self, cmd: &str) -> Command {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("再见！");
                Command::Quit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_commands();
                Command::Continue
            }
            "/history" => {
                println!();
                println!("{}", self.formatter.format_transcript(&self.transcript));
                println!();
                Command::Continue
            }
            "/clear" => {
                self.transcript = Transcript::new();
                println!("{}", "已开始新的对话。".dimmed());
                Command::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                Command::Continue
            }
        }
    }

    async fn process_query(&mut self, query: &str) {
        println!();

        let progress: Box<dyn ProgressNotifier> = if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        };

        match self
            .use_case
            .execute(&mut self.transcript, query, progress.as_ref())
            .await
        {
            Ok(output) => println!("{}", self.formatter.format_reply(&output)),
            Err(e) => eprintln!("Error: {}", e),
        }
        println!();
    }
}
