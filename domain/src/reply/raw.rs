//! Raw response body classification

use serde_json::Value;

/// A response body as received from the assistant endpoint (Value Object)
///
/// The endpoint answers with a JSON object on some calls and with
/// event-stream-shaped text on others, even when streaming is disabled.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Body decoded as JSON (object, or any other non-string JSON value)
    Structured(Value),
    /// Body that is not JSON, or a JSON string literal unwrapped to its text
    Text(String),
}

impl RawResponse {
    /// Classify a response body.
    ///
    /// Mirrors a JSON-decoding HTTP client: the body is decoded as JSON when
    /// possible, a top-level JSON string is unwrapped to its text, and
    /// anything that fails to decode is kept as text.
    ///
    /// # Examples
    ///
    /// ```
    /// use xuanji_domain::RawResponse;
    ///
    /// assert!(RawResponse::from_body(r#"{"content":"hi"}"#).is_structured());
    /// assert!(!RawResponse::from_body("event:reply data:{}").is_structured());
    /// assert_eq!(
    ///     RawResponse::from_body(r#""event:reply""#),
    ///     RawResponse::Text("event:reply".to_string())
    /// );
    /// ```
    pub fn from_body(body: impl Into<String>) -> Self {
        let body = body.into();
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::String(inner)) => RawResponse::Text(inner),
            Ok(value) => RawResponse::Structured(value),
            Err(_) => RawResponse::Text(body),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, RawResponse::Structured(_))
    }

    /// Size of the body in bytes, for diagnostics
    pub fn len(&self) -> usize {
        match self {
            RawResponse::Structured(value) => value.to_string().len(),
            RawResponse::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawResponse::Structured(value) => value.is_null(),
            RawResponse::Text(text) => text.is_empty(),
        }
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Structured(value)
    }
}

impl From<String> for RawResponse {
    fn from(text: String) -> Self {
        RawResponse::Text(text)
    }
}

impl From<&str> for RawResponse {
    fn from(text: &str) -> Self {
        RawResponse::Text(text.to_string())
    }
}
