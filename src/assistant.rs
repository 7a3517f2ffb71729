//! Reply backends
//!
//! A turn is answered either by the rule-based tutor or by forwarding the
//! message to a hosted model. Handlers only see [`StudyAssistant`].

use crate::api::BackendInfo;
use crate::config::{AppConfig, BackendKind};
use crate::llm::{LlmError, LlmRequest, LlmService, LoggingService, OpenAIService};
use crate::tutor;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Fixed instruction sent with every hosted-model turn
pub const STUDY_SYSTEM_PROMPT: &str = "You are a helpful personal study assistant. Explain step-by-step in simple language and give a small example when helpful.";

/// Key used in gateway mode, where the gateway handles authentication
const GATEWAY_API_KEY: &str = "implicit";

/// Failure to produce a reply
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Missing OPENAI_API_KEY. Set it in the environment before starting the server.")]
    MissingCredential,
    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// Something that can answer a study turn
#[async_trait]
pub trait StudyAssistant: Send + Sync {
    async fn reply(&self, message: &str, history: &[String]) -> Result<String, AssistantError>;

    /// Backend description for the status endpoint
    fn info(&self) -> BackendInfo;
}

/// Rule-based tutor with an optional cosmetic delay
pub struct RuleTutor {
    delay: Duration,
}

impl RuleTutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StudyAssistant for RuleTutor {
    async fn reply(&self, message: &str, history: &[String]) -> Result<String, AssistantError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(tutor::respond(message, history))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            backend: BackendKind::Rules.as_str().to_string(),
            model: None,
            credential_configured: None,
        }
    }
}

/// Pass-through to a hosted model
///
/// Without a credential the service is absent and every turn fails with
/// [`AssistantError::MissingCredential`] until the operator restarts with one.
pub struct HostedAssistant {
    service: Option<Arc<dyn LlmService>>,
    model: String,
}

impl HostedAssistant {
    pub fn new(service: Option<Arc<dyn LlmService>>, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }
}

#[async_trait]
impl StudyAssistant for HostedAssistant {
    async fn reply(&self, message: &str, _history: &[String]) -> Result<String, AssistantError> {
        let service = self
            .service
            .as_ref()
            .ok_or(AssistantError::MissingCredential)?;

        let request = LlmRequest::new(STUDY_SYSTEM_PROMPT, message);
        let response = service.complete(&request).await?;
        Ok(response.text)
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            backend: BackendKind::OpenAI.as_str().to_string(),
            model: Some(self.model.clone()),
            credential_configured: Some(self.service.is_some()),
        }
    }
}

/// Build the configured backend
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn StudyAssistant>, LlmError> {
    match config.backend {
        BackendKind::Rules => Ok(Arc::new(RuleTutor::new(config.reply_delay))),
        BackendKind::OpenAI => {
            let api_key = config
                .openai_api_key
                .clone()
                .or_else(|| config.gateway.as_ref().map(|_| GATEWAY_API_KEY.to_string()));

            let service = match api_key {
                Some(key) => {
                    let inner =
                        OpenAIService::new(key, &config.openai_model, config.gateway.as_deref())?;
                    let logged: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(inner)));
                    Some(logged)
                }
                None => None,
            };

            Ok(Arc::new(HostedAssistant::new(service, &config.openai_model)))
        }
    }
}
