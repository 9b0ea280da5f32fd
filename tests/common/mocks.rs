//! Mock implementations for testing.
//!
//! Provides a mock LLM client and a scripted capability agent that can be
//! shared across test files without duplication.

#![allow(dead_code)]

use ares_research::agents::roles::{PLANNER, SEARCHER, WRITER};
use ares_research::agents::{AgentError, AgentInput, AgentSpec, CapabilityAgent};
use ares_research::llm::LLMClient;
use ares_research::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Mock LLM client for testing with a fixed response.
///
/// Records the last system prompt it was given.
pub struct MockLLMClient {
    response: String,
    failure: Option<AppError>,
    last_system: Mutex<Option<String>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            failure: None,
            last_system: Mutex::new(None),
        }
    }

    /// Create a mock client that always returns an invocation-style error.
    pub fn failing() -> Self {
        Self {
            failure: Some(AppError::LLM("Mock LLM failure".to_string())),
            ..Self::new("")
        }
    }

    /// Create a mock client whose provider cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            failure: Some(AppError::LlmUnavailable("connection refused".to_string())),
            ..Self::new("")
        }
    }

    pub fn last_system(&self) -> Option<String> {
        self.last_system.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<String> {
        match &self.failure {
            Some(AppError::LlmUnavailable(msg)) => Err(AppError::LlmUnavailable(msg.clone())),
            Some(err) => Err(AppError::LLM(err.to_string())),
            None => Ok(self.response.clone()),
        }
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.answer()
    }

    async fn generate_with_system(&self, system: &str, _prompt: &str) -> Result<String> {
        *self.last_system.lock().unwrap() = Some(system.to_string());
        self.answer()
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Render a planner answer for the given `(reason, query)` pairs.
pub fn plan_json(items: &[(&str, &str)]) -> String {
    let searches: Vec<_> = items
        .iter()
        .map(|(reason, query)| json!({"reason": reason, "query": query}))
        .collect();
    json!({ "searches": searches }).to_string()
}

/// Render a writer answer.
pub fn report_json(summary: &str, body: &str, follow_ups: &[&str]) -> String {
    json!({
        "summary": summary,
        "report_body": body,
        "follow_up_questions": follow_ups,
    })
    .to_string()
}

/// Pull the planned query back out of a searcher input.
pub fn query_of(search_input: &str) -> String {
    search_input
        .strip_prefix("Search the web for '")
        .and_then(|rest| rest.split("', Reason for searching:").next())
        .unwrap_or(search_input)
        .to_string()
}

/// Capability agent that answers every role from a script.
///
/// Dispatches on the role name. Searcher answers can be delayed or made to
/// fail per query, and the agent keeps counters for assertions about the
/// fan-out (calls per role, how many searches overlapped).
pub struct StubAgent {
    plan: String,
    report: String,
    answers: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    failing_query: Option<String>,
    panicking_query: Option<String>,
    fail_role: Option<&'static str>,
    planner_calls: AtomicUsize,
    searcher_calls: AtomicUsize,
    writer_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    planner_inputs: Mutex<Vec<String>>,
    writer_inputs: Mutex<Vec<String>>,
}

impl StubAgent {
    /// Stub with the given raw planner output and a default report.
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            report: report_json(
                "Stub summary.",
                "# Stub Report\n\nStub body.",
                &["What else?"],
            ),
            answers: HashMap::new(),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            failing_query: None,
            panicking_query: None,
            fail_role: None,
            planner_calls: AtomicUsize::new(0),
            searcher_calls: AtomicUsize::new(0),
            writer_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            planner_inputs: Mutex::new(Vec::new()),
            writer_inputs: Mutex::new(Vec::new()),
        }
    }

    /// Stub planning the given `(reason, query)` pairs.
    pub fn with_plan(items: &[(&str, &str)]) -> Self {
        Self::new(plan_json(items))
    }

    pub fn report(mut self, raw: impl Into<String>) -> Self {
        self.report = raw.into();
        self
    }

    pub fn answer(mut self, query: &str, text: &str) -> Self {
        self.answers.insert(query.to_string(), text.to_string());
        self
    }

    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Delay applied to every search without its own delay.
    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Make the search for `query` fail as unavailable.
    pub fn fail_query(mut self, query: &str) -> Self {
        self.failing_query = Some(query.to_string());
        self
    }

    /// Make the search for `query` panic.
    pub fn panic_query(mut self, query: &str) -> Self {
        self.panicking_query = Some(query.to_string());
        self
    }

    /// Make every call for `role` fail as unavailable.
    pub fn fail_role(mut self, role: &'static str) -> Self {
        self.fail_role = Some(role);
        self
    }

    pub fn planner_calls(&self) -> usize {
        self.planner_calls.load(Ordering::SeqCst)
    }

    pub fn searcher_calls(&self) -> usize {
        self.searcher_calls.load(Ordering::SeqCst)
    }

    pub fn writer_calls(&self) -> usize {
        self.writer_calls.load(Ordering::SeqCst)
    }

    /// Most searches that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn planner_inputs(&self) -> Vec<String> {
        self.planner_inputs.lock().unwrap().clone()
    }

    pub fn writer_inputs(&self) -> Vec<String> {
        self.writer_inputs.lock().unwrap().clone()
    }

    fn unavailable(role: &str) -> AgentError {
        AgentError::Unavailable {
            agent: role.to_string(),
            reason: "stub failure".to_string(),
        }
    }

    async fn search(&self, input: &str) -> std::result::Result<String, AgentError> {
        let query = query_of(input);
        let delay = self
            .delays
            .get(&query)
            .copied()
            .unwrap_or(self.default_delay);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking_query.as_deref() == Some(query.as_str()) {
            panic!("stub search panicked for {}", query);
        }
        if self.failing_query.as_deref() == Some(query.as_str()) {
            return Err(Self::unavailable(SEARCHER));
        }
        Ok(self
            .answers
            .get(&query)
            .cloned()
            .unwrap_or_else(|| format!("Result for {}", query)))
    }
}

#[async_trait]
impl CapabilityAgent for StubAgent {
    async fn invoke(
        &self,
        spec: &AgentSpec,
        input: &AgentInput,
    ) -> std::result::Result<String, AgentError> {
        let role = spec.name.as_str();
        match role {
            PLANNER => self.planner_calls.fetch_add(1, Ordering::SeqCst),
            SEARCHER => self.searcher_calls.fetch_add(1, Ordering::SeqCst),
            _ => self.writer_calls.fetch_add(1, Ordering::SeqCst),
        };

        if self.fail_role == Some(role) {
            return Err(Self::unavailable(role));
        }

        match role {
            PLANNER => {
                self.planner_inputs.lock().unwrap().push(input.render());
                Ok(self.plan.clone())
            }
            SEARCHER => self.search(&input.render()).await,
            WRITER => {
                self.writer_inputs.lock().unwrap().push(input.render());
                Ok(self.report.clone())
            }
            other => Err(AgentError::Invocation {
                agent: other.to_string(),
                reason: "unknown role".to_string(),
            }),
        }
    }
}
