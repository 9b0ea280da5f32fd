//! Three-stage research workflow
//!
//! A run takes a natural-language query through three stages:
//!
//! 1. **Planning** - the planner agent turns the query into a [`SearchPlan`]
//! 2. **Searching** - one searcher call per planned item, all in flight at once
//! 3. **Writing** - the writer agent synthesizes every result into a [`ReportData`]
//!
//! Progress is exposed as a stream of [`RunEvent`]s, one per stage boundary:
//! `Started`, `PlanReady`, `SearchesComplete`, `ReportReady`. A failure in any
//! stage ends the stream with a single [`ResearchError`] naming that stage.
//!
//! # Usage
//!
//! ```ignore
//! use ares_research::agents::ResearchAgents;
//! use ares_research::research::{ResearchCoordinator, RunEvent};
//! use futures::StreamExt;
//!
//! let coordinator = ResearchCoordinator::new(ResearchAgents::from_config(&config)?);
//! let mut events = coordinator.run("impact of tariffs on coffee prices");
//!
//! while let Some(event) = events.next().await {
//!     match event? {
//!         RunEvent::PlanReady { plan } => println!("{} searches planned", plan.len()),
//!         RunEvent::ReportReady { report } => println!("{}", report.report_body),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! [`SearchPlan`]: crate::types::SearchPlan
//! [`ReportData`]: crate::types::ReportData

pub mod coordinator;
pub mod error;
pub mod events;
pub mod prompts;

pub use coordinator::{ResearchCoordinator, ResearchOutcome, RunStream};
pub use error::ResearchError;
pub use events::{RunEvent, RunState, Stage};
