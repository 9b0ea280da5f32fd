//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the chat-completion providers
//! the research agents run on:
//! - **OpenAI**: any OpenAI-compatible `/chat/completions` endpoint
//! - **Ollama**: a local Ollama server via `/api/chat`

use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs)
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "sk-...".to_string(),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     model: "gpt-4o-mini".to_string(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2".to_string(),
    /// };
    /// ```
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// `timeout` bounds every HTTP request the client makes. The research
    /// workflow itself defines no timeouts, so this is the only one in play.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the HTTP client cannot be built.
    pub fn create_client(&self, timeout: Duration) -> Result<Arc<dyn LLMClient>> {
        let http = build_http_client(timeout)?;

        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => Ok(Arc::new(super::openai::OpenAIClient::new(
                http,
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            Provider::Ollama { base_url, model } => Ok(Arc::new(
                super::ollama::OllamaClient::new(http, base_url.clone(), model.clone()),
            )),
        }
    }

    /// Same provider, different model
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        let model = model.into();
        match self {
            Provider::OpenAI {
                api_key, api_base, ..
            } => Provider::OpenAI {
                api_key: api_key.clone(),
                api_base: api_base.clone(),
                model,
            },
            Provider::Ollama { base_url, .. } => Provider::Ollama {
                base_url: base_url.clone(),
                model,
            },
        }
    }

    /// The model this provider is configured for
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } | Provider::Ollama { model, .. } => model,
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Map a failed `send()` to an availability error.
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> AppError {
    AppError::LlmUnavailable(format!("{} HTTP request failed: {}", provider, err))
}

/// Map a non-success HTTP status to an error.
///
/// Rate limiting and server-side failures mean the provider could not serve
/// the request at all; anything else is a problem with the request itself.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> AppError {
    let message = format!("{} request failed ({}): {}", provider, status, body);
    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
    {
        AppError::LlmUnavailable(message)
    } else {
        AppError::LLM(message)
    }
}
