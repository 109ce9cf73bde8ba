//! LLM Client: the single point of entry for all provider calls.
//!
//! ARCHITECTURAL RULE: no other module talks to the completion API directly.
//! Every call goes through `LlmClient::generate`, which owns retries,
//! cancellation and envelope decoding.
//!
//! Model: gpt-4o-mini (hardcoded)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub mod prompts;
pub mod retry;
pub mod transport;

use retry::RetryPolicy;
use transport::{CompletionTransport, HttpTransport, RawResponse};

/// The model used for all idea generation calls.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("request cancelled")]
    Cancelled,

    #[error("provider task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl LlmError {
    /// Upstream HTTP status, when the provider actually answered.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything one schema-constrained call needs.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f64,
    /// Name + JSON schema, see `generation::schema`.
    pub schema_name: &'a str,
    pub schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Schema-constrained completion client with an injected retry policy.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn CompletionTransport>,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self::with_transport(
            Arc::new(HttpTransport::new(api_key)?),
            RetryPolicy::default(),
        ))
    }

    pub fn with_transport(transport: Arc<dyn CompletionTransport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Sends one schema-constrained completion and returns the message content.
    ///
    /// Retries transient failures (network errors, statuses accepted by the
    /// retry policy) with linear backoff. Other non-success statuses fail at once.
    /// `cancel` is honoured before each attempt, during backoff and while a call
    /// is in flight; an in-flight call is left to finish in the background.
    pub async fn generate(
        &self,
        request: &CompletionRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<String, LlmError> {
        let body = serde_json::to_value(ChatRequest {
            model: MODEL,
            temperature: request.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: request.schema_name,
                    strict: true,
                    schema: request.schema,
                },
            },
        })?;

        let mut attempts = 0;
        let mut last_error: Option<LlmError> = None;

        while self.retry.has_attempts_left(attempts) {
            if attempts > 0 {
                let delay = self.retry.delay_for(attempts);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempts,
                    delay.as_millis()
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            if cancel.is_cancelled() {
                return Err(LlmError::Cancelled);
            }
            attempts += 1;

            let transport = Arc::clone(&self.transport);
            let attempt_body = body.clone();
            let in_flight = tokio::spawn(async move { transport.post(attempt_body).await });

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("LLM call cancelled during attempt {attempts}; discarding in-flight result");
                    return Err(LlmError::Cancelled);
                }
                joined = in_flight => joined?,
            };

            let response = match outcome {
                Ok(r) => r,
                Err(e) => {
                    warn!("LLM transport error on attempt {attempts}: {e}");
                    last_error = Some(e);
                    continue;
                }
            };

            if self.retry.is_retryable(response.status) {
                warn!("LLM API returned {}: {}", response.status, response.body);
                last_error = Some(LlmError::Api {
                    status: response.status,
                    message: response.body,
                });
                continue;
            }

            if !response.is_success() {
                return Err(api_error(response));
            }

            return extract_content(&response.body);
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }
}

/// Builds an `Api` error, preferring the provider's own message when the body parses.
fn api_error(response: RawResponse) -> LlmError {
    let message = serde_json::from_str::<ProviderError>(&response.body)
        .map(|e| e.error.message)
        .unwrap_or(response.body);
    LlmError::Api {
        status: response.status,
        message,
    }
}

/// Pulls the first choice's message content out of a chat-completion envelope.
fn extract_content(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
