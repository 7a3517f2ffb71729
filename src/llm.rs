//! LLM provider abstraction
//!
//! The hosted-model backend talks to providers only through [`LlmService`].

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{OpenAIService, DEFAULT_MODEL};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    fn model_id(&self) -> &str;
}

/// Wraps a provider and records every call's latency and outcome
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let started = Instant::now();
        let outcome = self.inner.complete(request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let model = self.inner.model_id();

        match &outcome {
            Ok(response) => tracing::info!(
                model,
                elapsed_ms,
                prompt_chars = request.prompt.len(),
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "Hosted model replied"
            ),
            Err(e) => tracing::error!(
                model,
                elapsed_ms,
                kind = ?e.kind,
                transient = e.kind.is_transient(),
                error = %e,
                "Hosted model call failed"
            ),
        }

        outcome
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
