//! Chat-completion client for the external LLM endpoint
//!
//! One request per call, no retries. Every request carries the configured
//! timeout. The response body is validated by a single typed step
//! ([`parse_completion`]); anything other than a non-empty
//! `choices[0].message.content` is a [`CompletionError`].

use evplan_common::config::LlmSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("evplan/", env!("CARGO_PKG_VERSION"));

/// Completion failures. Callers turn these into diagnostic payloads.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("LLM response has no choices")]
    NoChoices,

    #[error("LLM response has no message")]
    NoMessage,

    #[error("LLM response has no content")]
    EmptyContent,

    #[error("Failed to extract themes from LLM response")]
    NoThemes,
}

/// HTTP client bound to one completion endpoint and model
#[derive(Clone)]
pub struct CompletionClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, CompletionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.clone(),
            endpoint: chat_completions_url(&settings.base_url),
            api_key: settings.api_key.clone(),
            model: settings.model_name.clone(),
            timeout: settings.timeout,
        })
    }

    /// Base URL as configured (shown in troubleshooting output)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full chat-completions URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as a single user message and return the trimmed reply
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        let mut builder = self.http_client.post(&self.endpoint).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let content = parse_completion(&body)?;

        tracing::info!(
            model = %self.model,
            response_chars = content.len(),
            "Completion received"
        );

        Ok(content)
    }

    fn transport_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout(self.timeout)
        } else {
            CompletionError::Network(err.to_string())
        }
    }
}

/// Derive the chat-completions URL from a configured base URL.
///
/// - `.../chat/completions` is used as-is
/// - `.../v1` gets `/chat/completions`
/// - anything else gets `/v1/chat/completions`
pub fn chat_completions_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else if base.ends_with("/v1") {
        format!("{}/chat/completions", base)
    } else {
        format!("{}/v1/chat/completions", base)
    }
}

/// Validate a completion response body and extract the trimmed text
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Parse(e.to_string()))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::NoChoices)?;
    let message = choice.message.ok_or(CompletionError::NoMessage)?;
    let content = message.content.unwrap_or_default();

    let content = content.trim();
    if content.is_empty() {
        return Err(CompletionError::EmptyContent);
    }
    Ok(content.to_string())
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
