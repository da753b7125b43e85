//! CLI entrypoint for xuanji
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xuanji_application::{BehaviorConfig, NoProgress, ProgressNotifier, SubmitQueryUseCase};
use xuanji_domain::{OutputFormat, Transcript, has_errors};
use xuanji_infrastructure::{ConfigLoader, FileConfig, LkeChatGateway};
use xuanji_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting xuanji");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    apply_cli_overrides(&cli, &mut config);

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("{} {}", "error:".red().bold(), issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors(&issues) {
        bail!("Invalid configuration");
    }

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color && !cli.no_color,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    // validate() guarantees a non-blank key
    let bot_app_key = config.endpoint.bot_app_key().unwrap_or_default();
    let gateway = Arc::new(
        LkeChatGateway::new(&config.endpoint.url, bot_app_key)
            .context("Failed to create endpoint client")?,
    );
    info!(endpoint = gateway.endpoint(), "Endpoint configured");

    let use_case = SubmitQueryUseCase::new(gateway)
        .with_template(config.persona.template())
        .with_model(config.endpoint.parse_model().0)
        .with_behavior(BehaviorConfig::from_timeout_seconds(
            config.endpoint.timeout_secs,
        ));
    let formatter = ConsoleFormatter::new(config.persona.assistant_name.clone());

    // Chat mode
    if cli.is_chat() {
        let mut repl = ChatRepl::new(use_case, formatter).with_config(ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
        });

        repl.run(cli.question.clone()).await?;
        return Ok(());
    }

    // Single question mode
    let question = cli.question.as_deref().unwrap_or_default();
    let mut transcript = Transcript::new();

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let result = use_case
        .execute(&mut transcript, question, progress.as_ref())
        .await?;

    let rendered = match output.format {
        OutputFormat::Text => formatter.format_reply(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result, &transcript)?,
    };
    println!("{}", rendered);

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(url) = &cli.endpoint {
        config.endpoint.url = url.clone();
    }
    if let Some(key) = &cli.bot_app_key {
        config.endpoint.bot_app_key = Some(key.clone());
    }
    if let Some(model) = &cli.model {
        config.endpoint.model = Some(model.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.endpoint.timeout_secs = Some(timeout);
    }
}
