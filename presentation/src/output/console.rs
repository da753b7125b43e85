//! Console output formatter for chat turns

use colored::Colorize;
use serde::Serialize;
use xuanji_application::{SubmitQueryOutput, TurnStatus};
use xuanji_domain::{ChatMessage, Role, Transcript};

/// Label shown in front of the user's messages
pub const USER_DISPLAY_NAME: &str = "您";

/// Inner width of the boxed header, in terminal columns
const HEADER_WIDTH: usize = 45;

/// Formats chat messages for console display
#[derive(Debug, Clone)]
pub struct ConsoleFormatter {
    assistant_name: String,
}

/// JSON document printed for `--output json`
#[derive(Serialize)]
struct JsonTurn<'a> {
    reply: &'a str,
    #[serde(flatten)]
    status: TurnStatus,
    transcript: &'a Transcript,
}

impl ConsoleFormatter {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    fn label(&self, role: Role) -> String {
        match role {
            Role::User => format!("{USER_DISPLAY_NAME}:").cyan().bold().to_string(),
            Role::Assistant => format!("{}:", self.assistant_name)
                .yellow()
                .bold()
                .to_string(),
        }
    }

    /// Format one message as a labelled line
    pub fn format_message(&self, message: &ChatMessage) -> String {
        format!("{} {}", self.label(message.role()), message.content())
    }

    /// Format the reply of a finished turn
    ///
    /// Replies that did not come from the assistant's answer are dimmed.
    pub fn format_reply(&self, output: &SubmitQueryOutput) -> String {
        let content = output.reply.content();
        let body = if output.status.is_answered() {
            content.to_string()
        } else {
            content.dimmed().to_string()
        };
        format!("{} {}", self.label(output.reply.role()), body)
    }

    /// Format the whole conversation, one message per paragraph
    pub fn format_transcript(&self, transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return "(暂无对话记录)".dimmed().to_string();
        }
        transcript
            .iter()
            .map(|message| self.format_message(message))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format a finished turn as pretty JSON
    pub fn format_json(
        output: &SubmitQueryOutput,
        transcript: &Transcript,
    ) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonTurn {
            reply: output.reply.content(),
            status: output.status,
            transcript,
        })
    }

    /// Boxed title line
    pub fn header(title: &str) -> String {
        let pad = HEADER_WIDTH.saturating_sub(display_width(title));
        let left = pad / 2;
        format!(
            "╭{line}╮\n│{}{title}{}│\n╰{line}╯",
            " ".repeat(left),
            " ".repeat(pad - left),
            line = "─".repeat(HEADER_WIDTH),
        )
    }
}

/// Terminal columns taken by `s`, counting CJK characters as two
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use xuanji_domain::ReplySource;

    fn plain() {
        colored::control::set_override(false);
    }

    fn output(text: &str, status: TurnStatus) -> SubmitQueryOutput {
        SubmitQueryOutput {
            reply: ChatMessage::assistant(text),
            status,
        }
    }

    #[test]
    fn test_format_message_labels() {
        plain();
        let formatter = ConsoleFormatter::new("玄机AI命理师");
        assert_eq!(
            formatter.format_message(&ChatMessage::user("问财运")),
            "您: 问财运"
        );
        assert_eq!(
            formatter.format_message(&ChatMessage::assistant("财运亨通")),
            "玄机AI命理师: 财运亨通"
        );
    }

    #[test]
    fn test_format_transcript() {
        plain();
        let formatter = ConsoleFormatter::new("命理师");
        let mut transcript = Transcript::new();
        assert_eq!(formatter.format_transcript(&transcript), "(暂无对话记录)");

        transcript.push_user("一");
        transcript.push_assistant("二");
        assert_eq!(formatter.format_transcript(&transcript), "您: 一\n\n命理师: 二");
    }

    #[test]
    fn test_format_json() {
        let mut transcript = Transcript::new();
        transcript.push_user("问");
        transcript.push_assistant("答");
        let json = ConsoleFormatter::format_json(
            &output("答", TurnStatus::Answered(ReplySource::ReplyFrame)),
            &transcript,
        )
        .unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["reply"], "答");
        assert_eq!(value["status"], "answered");
        assert_eq!(value["source"], "reply_frame");
        assert_eq!(value["transcript"].as_array().unwrap().len(), 2);
        assert_eq!(value["transcript"][0]["role"], "user");
    }

    #[test]
    fn test_format_json_gateway_failure() {
        let json = ConsoleFormatter::format_json(
            &output("x", TurnStatus::GatewayFailed),
            &Transcript::new(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "gateway_failed");
        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_header_is_boxed() {
        let header = ConsoleFormatter::header("玄机");
        let lines: Vec<_> = header.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╭'));
        assert!(lines[1].contains("玄机"));
        assert_eq!(lines[1].chars().filter(|c| *c == ' ').count(), 41);
        assert_eq!(lines[0].chars().count(), HEADER_WIDTH + 2);
    }

    #[test]
    fn test_header_overlong_title_has_no_padding() {
        let title = "x".repeat(HEADER_WIDTH + 10);
        let header = ConsoleFormatter::header(&title);
        assert!(header.lines().nth(1).unwrap().starts_with(&format!("│{title}")));
    }
}
