//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the chat-completion providers
//! that back the research agents. Provider-specific HTTP details sit behind
//! the [`LLMClient`] trait so agents work with any supported backend.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - Runtime provider selection and client construction
//!
//! # Error semantics
//!
//! Clients distinguish transport failures ([`AppError::LlmUnavailable`]:
//! connection errors, timeouts, HTTP 429 and 5xx) from bad requests or
//! malformed responses ([`AppError::LLM`]). The agent layer maps these onto
//! unavailable/invocation agent errors.
//!
//! [`AppError::LlmUnavailable`]: crate::types::AppError::LlmUnavailable
//! [`AppError::LLM`]: crate::types::AppError::LLM
//!
//! # Example
//!
//! ```ignore
//! use ares_research::llm::Provider;
//! use std::time::Duration;
//!
//! let provider = Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     model: "llama3.2".to_string(),
//! };
//! let client = provider.create_client(Duration::from_secs(120))?;
//! let answer = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// Ollama `/api/chat` client.
pub mod ollama;
/// OpenAI-compatible `/chat/completions` client.
pub mod openai;

pub use client::{LLMClient, Provider};
