//! Server configuration from environment variables

use crate::llm::DEFAULT_MODEL;
use std::time::Duration;

/// Reply delay used when `STUDY_REPLY_DELAY_MS` is unset
const DEFAULT_REPLY_DELAY_MS: u64 = 450;
const DEFAULT_PORT: u16 = 3000;

/// Which reply backend answers turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Rules,
    OpenAI,
}

impl BackendKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "mock" => Some(Self::Rules),
            "openai" | "llm" => Some(Self::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::OpenAI => "openai",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub backend: BackendKind,
    /// Cosmetic pause before rule-based replies; zero disables it
    pub reply_delay: Duration,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Gateway base URL replacing the direct `OpenAI` endpoint
    pub gateway: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend: BackendKind::Rules,
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            gateway: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("STUDY_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let backend = match lookup("STUDY_BACKEND") {
            Some(value) => BackendKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown STUDY_BACKEND, using rules");
                BackendKind::Rules
            }),
            None => defaults.backend,
        };

        let reply_delay = lookup("STUDY_REPLY_DELAY_MS")
            .and_then(|ms| ms.parse().ok())
            .map_or(defaults.reply_delay, Duration::from_millis);

        Self {
            port,
            backend,
            reply_delay,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            openai_model: lookup("OPENAI_MODEL")
                .filter(|m| !m.is_empty())
                .unwrap_or(defaults.openai_model),
            gateway: lookup("LLM_GATEWAY").filter(|g| !g.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, BackendKind::Rules);
        assert_eq!(config.reply_delay, Duration::from_millis(450));
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, "gpt-4.1-mini");
        assert_eq!(config.gateway, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STUDY_PORT", "8080"),
            ("STUDY_BACKEND", "OpenAI"),
            ("STUDY_REPLY_DELAY_MS", "0"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("LLM_GATEWAY", "https://gw.example.com"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, BackendKind::OpenAI);
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.gateway.as_deref(), Some("https://gw.example.com"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("STUDY_PORT", "not-a-port"),
            ("STUDY_BACKEND", "magic"),
            ("STUDY_REPLY_DELAY_MS", "-5"),
            ("OPENAI_API_KEY", ""),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, BackendKind::Rules);
        assert_eq!(config.reply_delay, Duration::from_millis(450));
        assert_eq!(config.openai_api_key, None);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(BackendKind::parse(" rules "), Some(BackendKind::Rules));
        assert_eq!(BackendKind::parse("LLM"), Some(BackendKind::OpenAI));
        assert_eq!(BackendKind::parse(""), None);
        assert_eq!(BackendKind::OpenAI.as_str(), "openai");
    }
}
