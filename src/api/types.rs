//! API request and response types

use serde::Serialize;
use serde_json::Value;

/// A validated "submit a turn" request
///
/// Parsed from raw JSON rather than derived so that a wrong-typed `history`
/// degrades to empty instead of rejecting the whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub message: String,
    pub history: Vec<String>,
}

impl ChatTurn {
    /// `None` if `message` is missing, not a string, or empty.
    /// A non-array `history` is treated as empty. Non-string entries are kept
    /// in place as their loose text form so they still count toward the window.
    pub fn from_json(body: &Value) -> Option<Self> {
        let message = body
            .get("message")?
            .as_str()
            .filter(|m| !m.is_empty())?
            .to_string();

        let history = body
            .get("history")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(loose_text)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { message, history })
    }
}

/// Text form of a history entry, as a browser would join it: `null` is
/// empty, arrays join their elements with `,`, objects are opaque.
fn loose_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(loose_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Successful turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Active backend description
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_configured: Option<bool>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
