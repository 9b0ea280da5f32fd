use super::error::ResearchError;
use super::events::{RunEvent, RunState};
use super::prompts::{search_input, writer_input};
use crate::agents::{invoke_as, AgentInput, ResearchAgents, RoleBinding};
use crate::types::{ReportData, SearchPlan, SearchResult};
use futures::{FutureExt, Stream, StreamExt};
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Ordered, finite stream of run events, ending after the report or the first error
pub type RunStream = Pin<Box<dyn Stream<Item = Result<RunEvent, ResearchError>> + Send>>;

/// Everything a completed run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchOutcome {
    pub correlation_id: Uuid,
    pub plan: SearchPlan,
    /// Search results in completion order
    pub results: Vec<SearchResult>,
    pub report: ReportData,
}

/// Drives the plan, search and write stages of a research run
#[derive(Debug, Clone)]
pub struct ResearchCoordinator {
    agents: Arc<ResearchAgents>,
}

impl ResearchCoordinator {
    pub fn new(agents: ResearchAgents) -> Self {
        Self {
            agents: Arc::new(agents),
        }
    }

    pub fn agents(&self) -> &ResearchAgents {
        &self.agents
    }

    /// Start a run for `query`
    ///
    /// Nothing happens until the stream is polled, and each stage starts only
    /// once the previous stage's event has been pulled. Dropping the stream
    /// cancels the run, including any searches in flight.
    pub fn run(&self, query: &str) -> RunStream {
        let agents = self.agents.clone();
        let query = query.to_string();

        Box::pin(async_stream::stream! {
            if query.trim().is_empty() {
                yield Err(ResearchError::InvalidQuery("query must not be empty".to_string()));
                return;
            }

            let correlation_id = Uuid::new_v4();
            let span = info_span!("research_run", %correlation_id);
            let mut state = RunState::Idle;

            span.in_scope(|| {
                state.transition_to(RunState::Planning);
                info!(query = %query, "Research run started");
            });
            yield Ok(RunEvent::Started { correlation_id });

            let plan = match plan_searches(&agents.planner, &query).instrument(span.clone()).await {
                Ok(plan) => plan,
                Err(e) => {
                    fail(&span, &mut state, &e);
                    yield Err(e);
                    return;
                }
            };
            span.in_scope(|| state.transition_to(RunState::Searching));
            yield Ok(RunEvent::PlanReady { plan: plan.clone() });

            let results = match perform_searches(&agents.searcher, &plan).instrument(span.clone()).await {
                Ok(results) => results,
                Err(e) => {
                    fail(&span, &mut state, &e);
                    yield Err(e);
                    return;
                }
            };
            span.in_scope(|| state.transition_to(RunState::Writing));
            yield Ok(RunEvent::SearchesComplete { results: results.clone() });

            let report = match write_report(&agents.writer, &query, &results).instrument(span.clone()).await {
                Ok(report) => report,
                Err(e) => {
                    fail(&span, &mut state, &e);
                    yield Err(e);
                    return;
                }
            };
            span.in_scope(|| {
                state.transition_to(RunState::Done);
                info!("Research run complete");
            });
            yield Ok(RunEvent::ReportReady { report });
        })
    }

    /// Run to completion, returning everything the run produced
    pub async fn research(&self, query: &str) -> Result<ResearchOutcome, ResearchError> {
        let mut stream = self.run(query);
        let mut correlation_id = None;
        let mut plan = None;
        let mut results = None;

        while let Some(event) = stream.next().await {
            match event? {
                RunEvent::Started { correlation_id: id } => correlation_id = Some(id),
                RunEvent::PlanReady { plan: p } => plan = Some(p),
                RunEvent::SearchesComplete { results: r } => results = Some(r),
                RunEvent::ReportReady { report } => {
                    if let (Some(correlation_id), Some(plan), Some(results)) =
                        (correlation_id, plan.take(), results.take())
                    {
                        return Ok(ResearchOutcome {
                            correlation_id,
                            plan,
                            results,
                            report,
                        });
                    }
                    break;
                }
            }
        }

        Err(ResearchError::Incomplete)
    }
}

fn fail(span: &Span, state: &mut RunState, err: &ResearchError) {
    span.in_scope(|| {
        state.transition_to(RunState::Failed);
        error!(stage = ?err.stage(), error = %err, "Research run failed");
    });
}

/// Stage 1: ask the planner for a search plan
pub async fn plan_searches(planner: &RoleBinding, query: &str) -> Result<SearchPlan, ResearchError> {
    let input = AgentInput::Text(query.to_string());
    let plan: SearchPlan = invoke_as(planner.agent.as_ref(), &planner.spec, &input)
        .await
        .map_err(ResearchError::Planning)?;

    info!(searches = plan.len(), "Search plan ready");
    Ok(plan)
}

/// Stage 2: run one searcher call per planned item, all at once
///
/// Results come back in completion order. The first failure aborts the
/// remaining searches and fails the stage.
pub async fn perform_searches(
    searcher: &RoleBinding,
    plan: &SearchPlan,
) -> Result<Vec<SearchResult>, ResearchError> {
    let mut tasks = JoinSet::new();

    for item in &plan.searches {
        let binding = searcher.clone();
        let item = item.clone();
        tasks.spawn(
            async move {
                let input = AgentInput::Text(search_input(&item));
                let invocation = invoke_as::<String>(binding.agent.as_ref(), &binding.spec, &input);
                let outcome = AssertUnwindSafe(invocation).catch_unwind().await;
                (item.query, outcome)
            }
            .in_current_span(),
        );
    }

    info!(searches = tasks.len(), "Searches started");
    let mut results = Vec::with_capacity(plan.len());

    while let Some(joined) = tasks.join_next().await {
        let failure = match joined {
            Ok((query, Ok(Ok(text)))) => {
                tracing::debug!(query = %query, done = results.len() + 1, "Search complete");
                results.push(SearchResult { query, text });
                continue;
            }
            Ok((query, Ok(Err(source)))) => ResearchError::Search { query, source },
            Ok((query, Err(_))) => ResearchError::TaskPanicked {
                query,
                reason: "search task panicked".to_string(),
            },
            Err(e) => ResearchError::TaskPanicked {
                query: "unknown".to_string(),
                reason: e.to_string(),
            },
        };

        if !tasks.is_empty() {
            warn!(remaining = tasks.len(), "Search failed, aborting remaining searches");
            tasks.abort_all();
        }
        return Err(failure);
    }

    info!(results = results.len(), "All searches complete");
    Ok(results)
}

/// Stage 3: hand the query and every result to the writer
pub async fn write_report(
    writer: &RoleBinding,
    query: &str,
    results: &[SearchResult],
) -> Result<ReportData, ResearchError> {
    let input = AgentInput::Text(writer_input(query, results));
    let report: ReportData = invoke_as(writer.agent.as_ref(), &writer.spec, &input)
        .await
        .map_err(ResearchError::Writing)?;

    info!(
        report_len = report.report_body.len(),
        follow_ups = report.follow_up_questions.len(),
        "Report ready"
    );
    Ok(report)
}
