//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user's question for one chat turn (Value Object)
///
/// Surrounding whitespace is stripped; blank input is never a valid query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Try to create a new query, rejecting blank input
    pub fn try_new(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
