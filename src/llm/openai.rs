//! `OpenAI` Responses API provider implementation

use super::types::{LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmErrorKind, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model for study replies
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

const DIRECT_BASE_URL: &str = "https://api.openai.com";

/// `OpenAI` service using the v1/responses endpoint
pub struct OpenAIService {
    client: Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAIService {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        gateway: Option<&str>,
    ) -> Result<Self, LlmError> {
        let url = responses_url(gateway);

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                LlmError::new(
                    LlmErrorKind::Unknown,
                    format!("Failed to create HTTP client: {e}"),
                )
            })?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            url,
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> ResponsesApiRequest {
        ResponsesApiRequest {
            model: self.model.clone(),
            input: vec![ResponsesApiInputItem::Message {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            instructions: request.system.clone(),
        }
    }

    /// Collect every `output_text` item, in order, into one string
    fn normalize_response(resp: ResponsesApiResponse) -> LlmResponse {
        let mut text = String::new();

        for output in resp.output {
            match output.r#type.as_str() {
                "message" => {
                    for item in output.content.unwrap_or_default() {
                        if item.r#type == "output_text" {
                            if let Some(t) = item.text {
                                text.push_str(&t);
                            }
                        }
                    }
                }
                "reasoning" => {
                    // Internal model thinking, never shown
                }
                other => {
                    tracing::debug!(output_type = %other, "Ignoring unknown output type");
                }
            }
        }

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.input_tokens),
            output_tokens: u64::from(u.output_tokens),
        });

        LlmResponse { text, usage }
    }
}

fn responses_url(gateway: Option<&str>) -> String {
    match gateway {
        Some(gw) => format!("{}/openai/v1/responses", gw.trim_end_matches('/')),
        None => format!("{DIRECT_BASE_URL}/v1/responses"),
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let responses_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&responses_request)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() || e.is_connect() {
                    LlmErrorKind::Network
                } else {
                    LlmErrorKind::Unknown
                };
                LlmError::new(kind, format!("Request failed: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                LlmError::new(
                    LlmErrorKind::Network,
                    format!("Failed to read response: {e}"),
                )
            })?;

        if !status.is_success() {
            let upstream = serde_json::from_str::<OpenAIErrorResponse>(&body)
                .map_or(body, |resp| resp.error.message);
            return Err(LlmError::from_status(status.as_u16(), &upstream));
        }

        let responses_response: ResponsesApiResponse =
            serde_json::from_str(&body).map_err(|e| {
                LlmError::new(
                    LlmErrorKind::Unknown,
                    format!("Failed to parse response: {e} - body: {body}"),
                )
            })?;

        Ok(Self::normalize_response(responses_response))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Responses API types

#[derive(Debug, Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: Vec<ResponsesApiInputItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ResponsesApiInputItem {
    #[serde(rename = "message")]
    Message { role: String, content: String },
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    output: Vec<ResponsesApiOutput>,
    #[serde(default)]
    usage: Option<ResponsesApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiOutput {
    r#type: String,
    #[serde(default)]
    content: Option<Vec<ResponsesApiContent>>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiContent {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> OpenAIService {
        OpenAIService::new("test-key".to_string(), DEFAULT_MODEL, None).unwrap()
    }

    #[test]
    fn test_urls() {
        assert_eq!(responses_url(None), "https://api.openai.com/v1/responses");
        assert_eq!(
            responses_url(Some("https://gw.example.com/llm/")),
            "https://gw.example.com/llm/openai/v1/responses"
        );
    }

    #[test]
    fn test_translate_request_wire_format() {
        let request = LlmRequest::new("Be helpful.", "explain limits");
        let wire = serde_json::to_value(service().translate_request(&request)).unwrap();
        assert_eq!(
            wire,
            json!({
                "model": "gpt-4.1-mini",
                "input": [
                    {"type": "message", "role": "user", "content": "explain limits"}
                ],
                "instructions": "Be helpful."
            })
        );
    }

    #[test]
    fn test_normalize_joins_output_text() {
        let resp: ResponsesApiResponse = serde_json::from_value(json!({
            "status": "completed",
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "role": "assistant", "content": [
                    {"type": "output_text", "text": "Step 1. "},
                    {"type": "refusal", "refusal": "no"},
                    {"type": "output_text", "text": "Step 2."}
                ]}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 7, "total_tokens": 19}
        }))
        .unwrap();

        let normalized = OpenAIService::normalize_response(resp);
        assert_eq!(normalized.text, "Step 1. Step 2.");
        assert_eq!(normalized.usage.input_tokens, 12);
        assert_eq!(normalized.usage.output_tokens, 7);
    }

    #[test]
    fn test_normalize_without_text_is_empty() {
        let resp: ResponsesApiResponse =
            serde_json::from_value(json!({"output": []})).unwrap();
        let normalized = OpenAIService::normalize_response(resp);
        assert_eq!(normalized.text, "");
        assert_eq!(normalized.usage.input_tokens, 0);
    }
}
