//! Capability agents
//!
//! An agent maps role instructions plus an input to an output of a declared
//! shape. The research workflow talks to agents only through
//! [`CapabilityAgent`]; what sits behind it (an LLM, a rule engine, a test
//! stub) is not the workflow's concern.
//!
//! - [`AgentSpec`] - immutable role configuration: name, instructions, model, output shape
//! - [`CapabilityAgent`] - the invocation seam, returns raw output text
//! - [`invoke_as`] - invoke and coerce into a typed [`StructuredOutput`]
//! - [`LlmAgent`] - a [`CapabilityAgent`] backed by any [`LLMClient`](crate::llm::LLMClient)
//! - [`roles`] - the planner, searcher and writer role definitions

pub mod llm_agent;
pub mod output;
pub mod roles;

use crate::types::AppError;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde_json::Value;

pub use llm_agent::LlmAgent;
pub use output::{extract_json, invoke_as, StructuredOutput};
pub use roles::{ResearchAgents, RoleBinding};

/// Errors surfaced by the agent adapter. No retries happen at this layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The agent answered, but not with output of the expected shape.
    #[error("agent '{agent}' returned unusable output: {reason}")]
    Invocation { agent: String, reason: String },

    /// The agent could not be reached or refused to serve the request.
    #[error("agent '{agent}' is unavailable: {reason}")]
    Unavailable { agent: String, reason: String },
}

impl AgentError {
    /// Name of the agent that failed
    pub fn agent(&self) -> &str {
        match self {
            AgentError::Invocation { agent, .. } | AgentError::Unavailable { agent, .. } => agent,
        }
    }

    /// Whether this is a transport/availability failure
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AgentError::Unavailable { .. })
    }

    /// Classify an LLM client error for the named agent
    pub fn from_llm(agent: &str, err: AppError) -> Self {
        match err {
            AppError::LlmUnavailable(reason) => AgentError::Unavailable {
                agent: agent.to_string(),
                reason,
            },
            other => AgentError::Invocation {
                agent: agent.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// The shape an agent's output must take.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputShape {
    /// Free-form text
    Text,
    /// A single JSON object conforming to `schema`
    Json {
        /// Short type name, used when prompting
        type_name: String,
        /// JSON Schema of the expected object
        schema: Value,
    },
}

impl OutputShape {
    /// Descriptor for a JSON object of type `T`
    pub fn json_for<T: JsonSchema>() -> Self {
        let type_name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Output")
            .to_string();
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default();
        OutputShape::Json { type_name, schema }
    }

    /// Whether the output is expected to be JSON
    pub fn is_json(&self) -> bool {
        matches!(self, OutputShape::Json { .. })
    }
}

/// Immutable configuration for one agent role.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSpec {
    /// Role name, e.g. "planner"
    pub name: String,
    /// Role instructions (system prompt)
    pub instructions: String,
    /// Model identifier, when the role pins one
    pub model: Option<String>,
    /// Expected output shape
    pub output: OutputShape,
}

impl AgentSpec {
    /// Create a spec without a pinned model
    pub fn new(name: impl Into<String>, instructions: impl Into<String>, output: OutputShape) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: None,
            output,
        }
    }

    /// Pin a model for this role
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Replace the role instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

/// Input handed to an agent: plain text or a structured record.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentInput {
    Text(String),
    Record(Value),
}

impl AgentInput {
    /// Render the input as prompt text
    pub fn render(&self) -> String {
        match self {
            AgentInput::Text(text) => text.clone(),
            AgentInput::Record(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<&str> for AgentInput {
    fn from(text: &str) -> Self {
        AgentInput::Text(text.to_string())
    }
}

impl From<String> for AgentInput {
    fn from(text: String) -> Self {
        AgentInput::Text(text)
    }
}

/// The external capability behind every agent role.
///
/// Implementations must be stateless with respect to a run: the same agent
/// instance serves many concurrent invocations.
#[async_trait]
pub trait CapabilityAgent: Send + Sync {
    /// Invoke the agent, returning its raw output
    async fn invoke(&self, spec: &AgentSpec, input: &AgentInput) -> Result<String, AgentError>;
}
