//! OpenAI-compatible chat-completions provider.
//!
//! Speaks the `/v1/chat/completions` wire format, which most hosted and
//! self-hosted inference servers accept. The API key stays on the backend.
//!
//! # Features
//!
//! - Async HTTP communication with a configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use docmill_llm::HttpChatProvider;
//!
//! let provider = HttpChatProvider::new("https://api.openai.com", "sk-...", "gpt-4o-mini");
//! ```

use crate::LlmError;
use docmill_domain::traits::{ChatProvider, ChatRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for chat requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chat-completions provider over HTTP.
pub struct HttpChatProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl HttpChatProvider {
    /// Create a new provider.
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.openai.com")
    /// - `api_key`: bearer token sent with every request
    /// - `model`: model identifier (e.g., "gpt-4o-mini")
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send one chat completion request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network communication fails after all retries
    /// - The model is not available (HTTP 404)
    /// - The rate limit is hit (HTTP 429)
    /// - The response body does not match the chat-completions shape
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<ChatCompletionResponse>()
                            .await
                            .map_err(|e| {
                                LlmError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;
                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|c| c.message.content)
                            .filter(|content| !content.trim().is_empty())
                            .ok_or_else(|| {
                                LlmError::InvalidResponse("empty completion".to_string())
                            });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl ChatProvider for HttpChatProvider {
    type Error = LlmError;

    fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        // Blocking wrapper; callers run this off the async executor.
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.chat(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            system: "s".to_string(),
            user: "u".to_string(),
            temperature: 0.3,
            max_tokens: 128,
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = HttpChatProvider::new("https://api.openai.com", "key", "gpt-4o-mini");
        assert_eq!(provider.endpoint, "https://api.openai.com");
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_provider_with_max_retries() {
        let provider =
            HttpChatProvider::new("https://api.openai.com", "key", "gpt-4o-mini")
                .with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let provider = HttpChatProvider::new("http://127.0.0.1:1", "key", "gpt-4o-mini")
            .with_max_retries(1);

        let result = provider.chat(&request()).await;
        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_request_body_serializes_both_roles() {
        let body = ChatCompletionRequest {
            model: "m",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: 0.3,
            max_tokens: 64,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""role":"system""#));
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains(r#""max_tokens":64"#));
    }
}
