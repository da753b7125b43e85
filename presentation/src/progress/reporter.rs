//! Progress reporting while waiting on the assistant

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use xuanji_application::ProgressNotifier;

/// Message shown while a request is in flight
pub const THINKING_MESSAGE: &str = "正在思考中...";

/// Reports progress with a spinner that disappears once the reply arrives
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.dim}")
            .unwrap()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_request_start(&self, _query: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(THINKING_MESSAGE);
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock().unwrap() = Some(pb);
    }

    fn on_request_end(&self, _answered: bool) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_request_start(&self, _query: &str) {
        eprintln!("{} {}", "->".cyan(), THINKING_MESSAGE);
    }

    fn on_request_end(&self, answered: bool) {
        if !answered {
            eprintln!("  {} {}", "x".red(), "未能获得有效回复");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_request_start("问");
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_request_end(true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let reporter = ProgressReporter::default();
        reporter.on_request_end(false);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
