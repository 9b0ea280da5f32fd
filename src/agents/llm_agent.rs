//! LLM-backed capability agent

use super::{AgentError, AgentInput, AgentSpec, CapabilityAgent, OutputShape};
use crate::llm::LLMClient;
use async_trait::async_trait;
use std::sync::Arc;

/// A [`CapabilityAgent`] that answers with a chat-completion model.
///
/// The role instructions become the system prompt. For JSON output shapes the
/// schema is appended, asking the model for a single conforming object.
pub struct LlmAgent {
    llm: Arc<dyn LLMClient>,
}

impl LlmAgent {
    /// Wrap an LLM client
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// The model this agent runs on
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Build the system prompt for a role
    pub fn system_prompt(spec: &AgentSpec) -> String {
        match &spec.output {
            OutputShape::Text => spec.instructions.clone(),
            OutputShape::Json { type_name, schema } => {
                let schema = serde_json::to_string_pretty(schema)
                    .unwrap_or_else(|_| schema.to_string());
                format!(
                    "{}\n\nRespond with a single JSON object ({}) that conforms to the \
                     following JSON Schema. Output only the JSON object, with no \
                     surrounding commentary.\n\n{}",
                    spec.instructions, type_name, schema
                )
            }
        }
    }
}

#[async_trait]
impl CapabilityAgent for LlmAgent {
    async fn invoke(&self, spec: &AgentSpec, input: &AgentInput) -> Result<String, AgentError> {
        let system = Self::system_prompt(spec);
        let prompt = input.render();

        tracing::debug!(
            agent = %spec.name,
            model = self.llm.model_name(),
            prompt_len = prompt.len(),
            "Invoking agent"
        );

        let output = self
            .llm
            .generate_with_system(&system, &prompt)
            .await
            .map_err(|e| AgentError::from_llm(&spec.name, e))?;

        tracing::debug!(agent = %spec.name, output_len = output.len(), "Agent responded");
        Ok(output)
    }
}
