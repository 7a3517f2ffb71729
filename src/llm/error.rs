//! LLM error types

use thiserror::Error;

/// Failure talking to a hosted model
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error for a non-success HTTP status, prefixed by its classification
    pub fn from_status(status: u16, upstream_message: &str) -> Self {
        let kind = LlmErrorKind::from_status(status);
        let message = match kind.prefix() {
            Some(prefix) => format!("{prefix}: {upstream_message}"),
            None => format!("HTTP {status}: {upstream_message}"),
        };
        Self::new(kind, message)
    }
}

/// What went wrong upstream. Decides the status the client sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Timeout or connection failure
    Network,
    /// 429
    RateLimit,
    /// 5xx
    ServerError,
    /// 401 or 403; the configured key is bad
    Auth,
    /// 400
    InvalidRequest,
    Unknown,
}

impl LlmErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            429 => Self::RateLimit,
            400 => Self::InvalidRequest,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Auth => Some("Authentication failed"),
            Self::RateLimit => Some("Rate limit exceeded"),
            Self::InvalidRequest => Some("Invalid request"),
            Self::ServerError => Some("Server error"),
            Self::Network | Self::Unknown => None,
        }
    }

    /// Likely to clear up on its own. Logged only; nothing here retries.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }
}
