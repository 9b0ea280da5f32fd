use super::events::Stage;
use crate::agents::AgentError;

/// Why a research run failed.
///
/// Every failure is fatal to the run; no stage is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResearchError {
    /// The query was empty; the run never started.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("planning failed: {0}")]
    Planning(#[source] AgentError),

    #[error("search for '{query}' failed: {source}")]
    Search {
        query: String,
        #[source]
        source: AgentError,
    },

    /// A searcher task panicked or was cancelled before reporting.
    #[error("search task for '{query}' did not complete: {reason}")]
    TaskPanicked { query: String, reason: String },

    #[error("writing failed: {0}")]
    Writing(#[source] AgentError),

    /// The event stream ended without a report.
    #[error("research run ended before a report was produced")]
    Incomplete,
}

impl ResearchError {
    /// The stage that failed, `None` when the run never started
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ResearchError::InvalidQuery(_) | ResearchError::Incomplete => None,
            ResearchError::Planning(_) => Some(Stage::Planning),
            ResearchError::Search { .. } | ResearchError::TaskPanicked { .. } => {
                Some(Stage::Searching)
            }
            ResearchError::Writing(_) => Some(Stage::Writing),
        }
    }

    /// The underlying agent error, if any
    pub fn agent_error(&self) -> Option<&AgentError> {
        match self {
            ResearchError::Planning(e) | ResearchError::Writing(e) => Some(e),
            ResearchError::Search { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the run failed because an agent could not be reached
    pub fn is_unavailable(&self) -> bool {
        self.agent_error().is_some_and(AgentError::is_unavailable)
    }
}
