//! Docket completion providers
//!
//! Implementations of the `CompletionProvider` trait from `docket-domain`.
//!
//! # Providers
//!
//! - `OpenAiProvider`: hosted chat-completions API
//! - `OllamaProvider`: local Ollama API
//! - `MockProvider`: deterministic mock for testing
//! - `AnyProvider`: runtime selection between the above
//!
//! None of the providers retry. A failed call is reported once and the caller
//! decides what to do with the item.
//!
//! # Examples
//!
//! ```
//! use docket_llm::MockProvider;
//! use docket_domain::traits::CompletionProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;

use docket_domain::traits::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the provider
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message reported by the provider
        message: String,
    },

    /// Invalid response body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider returned no completion text
    #[error("Provider returned empty content")]
    EmptyContent,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Clones share their response table and call log.
///
/// # Examples
///
/// ```
/// use docket_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), MockReply::Error);
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn reply(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(prompt) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }
}

/// A provider chosen at runtime from configuration
#[derive(Debug)]
pub enum AnyProvider {
    /// Hosted chat-completions API
    OpenAi(OpenAiProvider),
    /// Local Ollama instance
    Ollama(OllamaProvider),
    /// Deterministic mock
    Mock(MockProvider),
}

impl AnyProvider {
    /// Short provider name for logs
    pub fn name(&self) -> &'static str {
        match self {
            AnyProvider::OpenAi(_) => "openai",
            AnyProvider::Ollama(_) => "ollama",
            AnyProvider::Mock(_) => "mock",
        }
    }
}

impl CompletionProvider for AnyProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::OpenAi(provider) => provider.generate(prompt).await,
            AnyProvider::Ollama(provider) => provider.generate(prompt).await,
            AnyProvider::Mock(provider) => provider.reply(prompt),
        }
    }
}
