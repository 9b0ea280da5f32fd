//! Planner, searcher and writer roles
//!
//! Each role is an [`AgentSpec`] (instructions, model, output shape) bound to
//! the [`CapabilityAgent`] that serves it.

use super::{AgentSpec, CapabilityAgent, LlmAgent, OutputShape};
use crate::types::{ReportData, Result, SearchPlan};
use crate::utils::toml_config::{AgentOverride, ResearchConfig};
use std::sync::Arc;
use tracing::info;

pub const PLANNER: &str = "planner";
pub const SEARCHER: &str = "searcher";
pub const WRITER: &str = "writer";

/// Number of searches the planner is asked for when not configured
pub const DEFAULT_NUM_SEARCHES: usize = 3;

/// Planner instructions asking for `num_searches` searches
pub fn planner_instructions(num_searches: usize) -> String {
    format!(
        "You are a helpful research assistant. Given a query, come up with a set of web \
         searches to perform to best answer the query. Output {} terms to query for. \
         For each search give the search term and your reasoning for why it is \
         important to the query.",
        num_searches
    )
}

pub const SEARCHER_INSTRUCTIONS: &str = "You are a research assistant. Given a search term, \
you search the web for that term and produce a concise summary of the results. The summary \
must be 2-3 paragraphs and less than 300 words. Capture the main points. Write succinctly, \
no need to have complete sentences or good grammar. This will be consumed by someone \
synthesizing a report, so it is vital you capture the essence and ignore any fluff. Do not \
include any additional commentary other than the summary itself.";

pub const WRITER_INSTRUCTIONS: &str = "You are a senior researcher tasked with writing a \
cohesive report for a research query. You will be provided with the original query and some \
initial research done by a research assistant. You should first come up with an outline for \
the report that describes the structure and flow of the report. Then, generate the report \
and return that as your final output. The final output should be in markdown format, and it \
should be lengthy and detailed. Aim for 5-10 pages of content, at least 1000 words. Also \
provide a short 2-3 sentence summary of the findings and a list of suggested topics to \
research further.";

/// Planner role: query in, [`SearchPlan`] out
pub fn planner_spec(num_searches: usize) -> AgentSpec {
    AgentSpec::new(
        PLANNER,
        planner_instructions(num_searches),
        OutputShape::json_for::<SearchPlan>(),
    )
}

/// Searcher role: one search in, text summary out
pub fn searcher_spec() -> AgentSpec {
    AgentSpec::new(SEARCHER, SEARCHER_INSTRUCTIONS, OutputShape::Text)
}

/// Writer role: query plus results in, [`ReportData`] out
pub fn writer_spec() -> AgentSpec {
    AgentSpec::new(WRITER, WRITER_INSTRUCTIONS, OutputShape::json_for::<ReportData>())
}

/// A role spec and the agent that serves it.
#[derive(Clone)]
pub struct RoleBinding {
    pub spec: AgentSpec,
    pub agent: Arc<dyn CapabilityAgent>,
}

impl RoleBinding {
    pub fn new(spec: AgentSpec, agent: Arc<dyn CapabilityAgent>) -> Self {
        Self { spec, agent }
    }
}

impl std::fmt::Debug for RoleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleBinding")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// The three agents a research run needs.
#[derive(Debug, Clone)]
pub struct ResearchAgents {
    pub planner: RoleBinding,
    pub searcher: RoleBinding,
    pub writer: RoleBinding,
}

impl ResearchAgents {
    pub fn new(planner: RoleBinding, searcher: RoleBinding, writer: RoleBinding) -> Self {
        Self {
            planner,
            searcher,
            writer,
        }
    }

    /// All three roles served by one agent with the built-in instructions
    pub fn uniform(agent: Arc<dyn CapabilityAgent>, num_searches: usize) -> Self {
        Self::new(
            RoleBinding::new(planner_spec(num_searches), agent.clone()),
            RoleBinding::new(searcher_spec(), agent.clone()),
            RoleBinding::new(writer_spec(), agent),
        )
    }

    /// Build LLM-backed agents from configuration
    ///
    /// The provider is resolved once; roles that pin a model get their own
    /// client, the rest share the default one.
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        let timeout = config.provider.request_timeout();
        let default_model = config.provider.default_model();
        let provider = config.provider.resolve(default_model)?;
        let shared: Arc<dyn CapabilityAgent> =
            Arc::new(LlmAgent::new(provider.create_client(timeout)?));

        let bind = |spec: AgentSpec, role: &AgentOverride| -> Result<RoleBinding> {
            let model = config.model_for(role);
            let spec = match &role.instructions {
                Some(text) => spec.with_instructions(text.clone()),
                None => spec,
            }
            .with_model(model.clone());

            let agent = if model == default_model {
                shared.clone()
            } else {
                let client = provider.with_model(model.clone()).create_client(timeout)?;
                Arc::new(LlmAgent::new(client)) as Arc<dyn CapabilityAgent>
            };

            info!(role = %spec.name, %model, provider = provider.name(), "Configured agent");
            Ok(RoleBinding::new(spec, agent))
        };

        Ok(Self::new(
            bind(
                planner_spec(config.research.num_searches),
                &config.agents.planner,
            )?,
            bind(searcher_spec(), &config.agents.searcher)?,
            bind(writer_spec(), &config.agents.writer)?,
        ))
    }
}
