//! Run events and workflow states

use crate::types::{ReportData, SearchPlan, SearchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One of the three workflow stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planning,
    Searching,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Planning => "planning",
            Stage::Searching => "searching",
            Stage::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single run.
///
/// `Idle -> Planning -> Searching -> Writing -> Done`, with `Failed` reachable
/// from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Planning,
    Searching,
    Writing,
    Done,
    Failed,
}

impl RunState {
    /// Whether no further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        match (self, next) {
            (Idle, Planning) | (Planning, Searching) | (Searching, Writing) | (Writing, Done) => {
                true
            }
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, logging the transition
    pub fn transition_to(&mut self, next: RunState) {
        debug_assert!(
            self.can_transition_to(next),
            "illegal run transition {:?} -> {:?}",
            self,
            next
        );
        tracing::debug!(from = ?*self, to = ?next, "Run state transition");
        *self = next;
    }

    /// The stage this state executes, if any
    pub fn stage(self) -> Option<Stage> {
        match self {
            RunState::Planning => Some(Stage::Planning),
            RunState::Searching => Some(Stage::Searching),
            RunState::Writing => Some(Stage::Writing),
            _ => None,
        }
    }
}

/// Progress notification emitted at each stage boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// The run began; carries its correlation id
    Started { correlation_id: Uuid },
    /// The planner produced a plan
    PlanReady { plan: SearchPlan },
    /// Every search finished; results are in completion order
    SearchesComplete { results: Vec<SearchResult> },
    /// The writer produced the final report
    ReportReady { report: ReportData },
}

impl RunEvent {
    /// Short event name, matching the serialized tag
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::Started { .. } => "started",
            RunEvent::PlanReady { .. } => "plan_ready",
            RunEvent::SearchesComplete { .. } => "searches_complete",
            RunEvent::ReportReady { .. } => "report_ready",
        }
    }

    /// The stage that completed, or `None` for `Started`
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunEvent::Started { .. } => None,
            RunEvent::PlanReady { .. } => Some(Stage::Planning),
            RunEvent::SearchesComplete { .. } => Some(Stage::Searching),
            RunEvent::ReportReady { .. } => Some(Stage::Writing),
        }
    }
}
