//! The network seam under `LlmClient`.
//!
//! `HttpTransport` talks to the real provider. Tests swap in a scripted
//! transport so retry and cancellation behaviour can be exercised offline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::LlmError;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Upper bound for a single attempt; the provider sets no limit of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Status and body of one provider response, success or not.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one chat-completion request body and returns the raw response.
///
/// Implementations must not retry; `LlmClient` owns the retry loop.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn post(&self, body: Value) -> Result<RawResponse, LlmError>;
}

pub struct HttpTransport {
    client: Client,
    api_key: String,
    url: String,
}

impl HttpTransport {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            url: OPENAI_API_URL.to_string(),
        })
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn post(&self, body: Value) -> Result<RawResponse, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
