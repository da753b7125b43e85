//! Best-effort reply extraction from assistant responses.
//!
//! The endpoint's response shape is inconsistent, so extraction walks an
//! ordered list of heuristics and stops at the first one that yields text.
//! It is pure text/JSON inspection and never fails: when nothing matches the
//! caller gets [`FALLBACK_REPLY`].
//!
//! | Order | Input | Heuristic |
//! |-------|-------|-----------|
//! | 1 | structured | `payload.content`, then top-level `content` |
//! | 2 | text | `payload.content` of the last `event:reply` frame |
//! | 3 | text | last `"content":"..."` occurrence |
//! | 4 | any | [`FALLBACK_REPLY`] |

use super::raw::RawResponse;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Returned when no heuristic finds a reply.
pub const FALLBACK_REPLY: &str = "抱歉，解析响应时出现问题，请重试。";

/// Start of a reply frame; the frame's JSON payload begins right after it.
static REPLY_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"event:\s*reply\s+data:\s*").expect("reply frame pattern"));

static CONTENT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""content"\s*:\s*"([^"]*)""#).expect("content field pattern")
});

/// Which heuristic produced an [`ExtractedReply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// `payload.content` of a structured body
    Payload,
    /// Top-level `content` of a structured body
    TopLevelContent,
    /// `payload.content` of the last reply frame in a text body
    ReplyFrame,
    /// Last `"content":"..."` match in a text body
    ContentPattern,
    /// Nothing matched
    Fallback,
}

/// Result of running the extractor over a [`RawResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReply {
    pub text: String,
    pub source: ReplySource,
}

impl ExtractedReply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    fn fallback() -> Self {
        Self::new(FALLBACK_REPLY, ReplySource::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }
}

/// Run the heuristics over `raw` and report which one matched.
pub fn extract(raw: &RawResponse) -> ExtractedReply {
    let found = match raw {
        RawResponse::Structured(value) => from_structured(value),
        RawResponse::Text(text) => from_reply_frames(text).or_else(|| from_content_pattern(text)),
    };
    found.unwrap_or_else(ExtractedReply::fallback)
}

/// Extract the display string for `raw`.
///
/// # Examples
///
/// ```
/// use xuanji_domain::{RawResponse, extract_reply, FALLBACK_REPLY};
///
/// let body = r#"event:reply data:{"type":"reply","payload":{"content":"A"}} event:reply data:{"type":"reply","payload":{"content":"B"}}"#;
/// assert_eq!(extract_reply(&RawResponse::from_body(body)), "B");
///
/// assert_eq!(extract_reply(&RawResponse::from_body("<html>")), FALLBACK_REPLY);
/// ```
pub fn extract_reply(raw: &RawResponse) -> String {
    extract(raw).text
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn payload_content(value: &Value) -> Option<&str> {
    non_empty_str(value.pointer("/payload/content"))
}

fn from_structured(value: &Value) -> Option<ExtractedReply> {
    if let Some(content) = payload_content(value) {
        return Some(ExtractedReply::new(content, ReplySource::Payload));
    }
    non_empty_str(value.get("content"))
        .map(|content| ExtractedReply::new(content, ReplySource::TopLevelContent))
}

/// Decode the JSON object that starts at the beginning of `data`.
///
/// Only the first value is read, so whatever follows the frame is ignored.
fn frame_payload(data: &str) -> Option<Value> {
    let mut values = serde_json::Deserializer::from_str(data).into_iter::<Value>();
    match values.next() {
        Some(Ok(value)) if value.is_object() => Some(value),
        _ => None,
    }
}

fn is_reply_payload(payload: &Value) -> bool {
    payload.get("type").and_then(Value::as_str) == Some("reply")
}

fn from_reply_frames(text: &str) -> Option<ExtractedReply> {
    let last = REPLY_FRAME
        .find_iter(text)
        .filter_map(|frame| frame_payload(&text[frame.end()..]))
        .filter(is_reply_payload)
        .last()?;

    payload_content(&last).map(|content| ExtractedReply::new(content, ReplySource::ReplyFrame))
}

fn from_content_pattern(text: &str) -> Option<ExtractedReply> {
    CONTENT_FIELD
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(|content| ExtractedReply::new(content, ReplySource::ContentPattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(body: &str) -> RawResponse {
        RawResponse::Text(body.to_string())
    }

    // ==================== Structured bodies ====================

    #[test]
    fn structured_payload_content_wins() {
        let raw = RawResponse::Structured(json!({
            "payload": {"content": "事业运势极佳"},
            "content": "ignored"
        }));
        let reply = extract(&raw);
        assert_eq!(reply.text, "事业运势极佳");
        assert_eq!(reply.source, ReplySource::Payload);
    }

    #[test]
    fn structured_top_level_content() {
        let raw = RawResponse::Structured(json!({"content": "感情稳定"}));
        let reply = extract(&raw);
        assert_eq!(reply.text, "感情稳定");
        assert_eq!(reply.source, ReplySource::TopLevelContent);
    }

    #[test]
    fn structured_empty_payload_content_falls_through_to_top_level() {
        let raw = RawResponse::Structured(json!({
            "payload": {"content": ""},
            "content": "top"
        }));
        assert_eq!(extract_reply(&raw), "top");
    }

    #[test]
    fn structured_without_content_is_fallback() {
        let raw = RawResponse::Structured(json!({"payload": {"other": 1}, "code": 0}));
        let reply = extract(&raw);
        assert!(reply.is_fallback());
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[test]
    fn structured_non_string_content_is_ignored() {
        let raw = RawResponse::Structured(json!({"payload": {"content": 5}, "content": null}));
        assert_eq!(extract_reply(&raw), FALLBACK_REPLY);
    }

    #[test]
    fn structured_non_object_is_fallback() {
        assert_eq!(
            extract_reply(&RawResponse::Structured(json!([{"content": "x"}]))),
            FALLBACK_REPLY
        );
        assert_eq!(extract_reply(&RawResponse::Structured(json!(42))), FALLBACK_REPLY);
    }

    #[test]
    fn structured_body_never_uses_text_heuristics() {
        // A JSON object whose string field happens to contain a frame
        let raw = RawResponse::Structured(json!({
            "raw": "event:reply data:{\"type\":\"reply\",\"payload\":{\"content\":\"x\"}}"
        }));
        assert_eq!(extract_reply(&raw), FALLBACK_REPLY);
    }

    // ==================== Reply frames ====================

    #[test]
    fn last_reply_frame_wins() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"A"}} event:reply data:{"type":"reply","payload":{"content":"B"}}"#;
        let reply = extract(&text(body));
        assert_eq!(reply.text, "B");
        assert_eq!(reply.source, ReplySource::ReplyFrame);
    }

    #[test]
    fn newline_separated_frames() {
        let body = "event:reply\ndata:{\"type\":\"reply\",\"payload\":{\"content\":\"您好\",\"is_from_self\":true}}\n\n\
                    event:token_stat\ndata:{\"type\":\"token_stat\",\"payload\":{\"used\":10}}\n\n\
                    event:reply\ndata:{\"type\":\"reply\",\"payload\":{\"content\":\"今日宜出行\",\"is_final\":true}}\n\n";
        assert_eq!(extract_reply(&text(body)), "今日宜出行");
    }

    #[test]
    fn frame_with_nested_objects_and_braces_in_strings() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"用 {} 包裹","meta":{"a":{"b":1}}}}"#;
        assert_eq!(extract_reply(&text(body)), "用 {} 包裹");
    }

    #[test]
    fn frame_content_is_json_unescaped() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"第一行\n第二行"}}"#;
        assert_eq!(extract_reply(&text(body)), "第一行\n第二行");
    }

    #[test]
    fn frame_with_wrong_type_is_skipped() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"A"}} event:reply data:{"type":"thought","payload":{"content":"B"}}"#;
        assert_eq!(extract_reply(&text(body)), "A");
    }

    #[test]
    fn malformed_frame_is_skipped() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"A"}} event:reply data:{"type":"reply","payload":{"#;
        assert_eq!(extract_reply(&text(body)), "A");
    }

    #[test]
    fn last_frame_without_content_falls_back_to_pattern() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"A"}} event:reply data:{"type":"reply","payload":{"status":"done"}}"#;
        let reply = extract(&text(body));
        assert_eq!(reply.text, "A");
        assert_eq!(reply.source, ReplySource::ContentPattern);
    }

    // ==================== Content pattern ====================

    #[test]
    fn content_pattern_returns_last_match() {
        let body = r#"garbage "content":"first" more "content":"second" tail"#;
        let reply = extract(&text(body));
        assert_eq!(reply.text, "second");
        assert_eq!(reply.source, ReplySource::ContentPattern);
    }

    #[test]
    fn content_pattern_inside_truncated_frame() {
        let body = r#"event:reply data:{"type":"reply","payload":{"content":"半截"#;
        assert_eq!(extract_reply(&text(body)), FALLBACK_REPLY);

        let body = r#"event:reply data:{"type":"reply","payload":{"content":"完整","#;
        assert_eq!(extract_reply(&text(body)), "完整");
    }

    #[test]
    fn content_pattern_is_verbatim() {
        let body = r#"prefix "content":"a\nb" suffix"#;
        assert_eq!(extract_reply(&text(body)), r"a\nb");
    }

    #[test]
    fn empty_content_pattern_is_fallback() {
        assert_eq!(extract_reply(&text(r#""content":"""#)), FALLBACK_REPLY);
    }

    // ==================== Fallback ====================

    #[test]
    fn unmatched_text_is_fallback() {
        for body in ["", "   ", "<html>502 Bad Gateway</html>", "event:reply data:", "{{{"] {
            let reply = extract(&text(body));
            assert!(reply.is_fallback(), "expected fallback for {body:?}");
            assert_eq!(reply.text, FALLBACK_REPLY);
        }
    }

    #[test]
    fn from_body_end_to_end() {
        assert_eq!(
            extract_reply(&RawResponse::from_body(r#"{"payload":{"content":"JSON"}}"#)),
            "JSON"
        );
        assert_eq!(
            extract_reply(&RawResponse::from_body(
                r#""event:reply data:{\"type\":\"reply\",\"payload\":{\"content\":\"wrapped\"}}""#
            )),
            "wrapped"
        );
    }
}
