//! HTTP body types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request or response body.
///
/// Response bodies are `Json` only when the transport ran in JSON mode and the
/// payload parsed; otherwise they arrive as `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// Raw text
    Text(String),
    /// Structured JSON
    Json(Value),
}

impl Body {
    /// Returns whether the body carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Json(_) => false,
        }
    }

    /// Returns the content type implied by the body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Text(_) => Some("text/plain"),
            Self::Json(_) => Some("application/json"),
        }
    }

    /// Returns the body serialized to its wire text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }

    /// Returns the body as a JSON value.
    ///
    /// Text is parsed when it holds JSON; other text becomes a JSON string and
    /// an empty body becomes `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(text) => {
                serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
            }
            Self::Json(value) => value.clone(),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}
