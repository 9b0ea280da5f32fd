//! # A.R.E.S Research
//!
//! A three-stage research workflow driven by LLM agents: a planner turns a
//! query into a set of web searches, a searcher answers every search
//! concurrently, and a writer synthesizes the answers into a long-form
//! markdown report. Progress streams back to the caller as each stage
//! completes.
//!
//! ## Overview
//!
//! A.R.E.S Research can be used in two ways:
//!
//! 1. **As a CLI** - Run the `ares-research` binary
//! 2. **As a library** - Drive [`ResearchCoordinator`] from your own code
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use ares_research::{ResearchAgents, ResearchConfig, ResearchCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResearchConfig::load("research.toml".as_ref())?;
//!     let coordinator = ResearchCoordinator::new(ResearchAgents::from_config(&config)?);
//!
//!     let outcome = coordinator.research("impact of tariffs on coffee prices").await?;
//!     println!("{}", outcome.report.report_body);
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Agents
//!
//! Anything implementing [`CapabilityAgent`] can serve a role, which is how
//! the test suite drives the workflow without a model:
//!
//! ```rust,ignore
//! use ares_research::{ResearchAgents, ResearchCoordinator};
//! use std::sync::Arc;
//!
//! let agents = ResearchAgents::uniform(Arc::new(MyAgent::default()), 3);
//! let coordinator = ResearchCoordinator::new(agents);
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Capability agent adapter and role definitions
//! - [`cli`] - Command-line parsing and terminal rendering
//! - [`llm`] - LLM client implementations
//! - [`research`] - The workflow orchestrator and its event stream
//! - [`types`] - Data model and error handling
//! - [`utils`] - Configuration and logging

#![warn(rustdoc::missing_crate_level_docs)]

/// Capability agents and research roles.
pub mod agents;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Three-stage research workflow.
pub mod research;
/// Data model and errors.
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentError, AgentSpec, CapabilityAgent, LlmAgent, ResearchAgents};
pub use llm::{LLMClient, Provider};
pub use research::{ResearchCoordinator, ResearchError, ResearchOutcome, RunEvent, Stage};
pub use types::{AppError, ReportData, Result, SearchItem, SearchPlan, SearchResult};
pub use utils::toml_config::ResearchConfig;
