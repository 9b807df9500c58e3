//! Docmill LLM Provider Layer
//!
//! Implementations of the `ChatProvider` trait from `docmill-domain`.
//!
//! # Providers
//!
//! - `MockChatProvider`: deterministic mock for testing
//! - `HttpChatProvider`: OpenAI-style chat-completions API over HTTP
//!
//! All providers run server-side; API credentials never leave the backend.
//!
//! # Examples
//!
//! ```
//! use docmill_llm::MockChatProvider;
//! use docmill_domain::traits::{ChatProvider, ChatRequest};
//!
//! let provider = MockChatProvider::new(r#"{"entries": []}"#);
//! let request = ChatRequest {
//!     system: "system".to_string(),
//!     user: "user".to_string(),
//!     temperature: 0.3,
//!     max_tokens: 256,
//! };
//! assert_eq!(provider.complete(&request).unwrap(), r#"{"entries": []}"#);
//! ```

#![warn(missing_docs)]

pub mod openai;

use docmill_domain::traits::{ChatProvider, ChatRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::HttpChatProvider;

/// Errors that can occur during chat-completion calls.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// Requested model is not available
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("llm error: {0}")]
    Other(String),
}

/// Provider used when delegated segmentation is switched off.
///
/// Satisfies the `ChatProvider` seam without any configuration; every call
/// errors, so a pipeline holding it always takes the heuristic path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledChatProvider;

impl ChatProvider for DisabledChatProvider {
    type Error = LlmError;

    fn complete(&self, _request: &ChatRequest) -> Result<String, Self::Error> {
        Err(LlmError::Other("chat provider is disabled".to_string()))
    }
}

/// Deterministic chat provider for tests.
///
/// Returns scripted responses in order, then a fixed default, without any
/// network calls. A scripted `"ERROR"` response produces an error instead,
/// which lets tests exercise the AI→heuristic fallback path.
#[derive(Debug, Clone)]
pub struct MockChatProvider {
    default_response: String,
    scripted: Arc<Mutex<VecDeque<String>>>,
    call_count: Arc<Mutex<usize>>,
}

/// Scripted marker that makes the mock return an error.
const ERROR_MARKER: &str = "ERROR";

impl MockChatProvider {
    /// Create a mock that answers every request with a fixed response.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every call fails with a communication error.
    pub fn failing() -> Self {
        Self::new(ERROR_MARKER)
    }

    /// Queue a response to be returned before the default.
    pub fn push_response(&self, response: impl Into<String>) {
        self.scripted.lock().unwrap().push_back(response.into());
    }

    /// Queue an error to be returned before the default.
    pub fn push_error(&self) {
        self.push_response(ERROR_MARKER);
    }

    /// How many times `complete` has been called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new(r#"{"entries": []}"#)
    }
}

impl ChatProvider for MockChatProvider {
    type Error = LlmError;

    fn complete(&self, _request: &ChatRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let next = self
            .scripted
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        if next == ERROR_MARKER {
            return Err(LlmError::Communication("mock network error".to_string()));
        }
        Ok(next)
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
    fn test_mock_default_response() {
        let provider = MockChatProvider::new("fixed");
        assert_eq!(provider.complete(&request()).unwrap(), "fixed");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_scripted_order() {
        let provider = MockChatProvider::new("default");
        provider.push_response("first");
        provider.push_response("second");

        assert_eq!(provider.complete(&request()).unwrap(), "first");
        assert_eq!(provider.complete(&request()).unwrap(), "second");
        assert_eq!(provider.complete(&request()).unwrap(), "default");
    }

    #[test]
    fn test_mock_scripted_error() {
        let provider = MockChatProvider::new("ok");
        provider.push_error();

        assert!(matches!(
            provider.complete(&request()),
            Err(LlmError::Communication(_))
        ));
        assert_eq!(provider.complete(&request()).unwrap(), "ok");
    }

    #[test]
    fn test_failing_mock_always_errors() {
        let provider = MockChatProvider::failing();
        assert!(provider.complete(&request()).is_err());
        assert!(provider.complete(&request()).is_err());
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let a = MockChatProvider::new("x");
        let b = a.clone();
        a.complete(&request()).unwrap();
        assert_eq!(b.call_count(), 1);
    }
}
