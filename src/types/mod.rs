use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============= Research Data Model =============

/// A single web search the planner wants performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchItem {
    /// Your reasoning for why this search is important to the query.
    pub reason: String,
    /// The search term to use for the web search.
    pub query: String,
}

impl SearchItem {
    /// Create a new search item
    pub fn new(reason: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            query: query.into(),
        }
    }

    /// Both fields must carry text
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "search item has an empty query".to_string(),
            ));
        }
        if self.reason.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "search item '{}' has an empty reason",
                self.query
            )));
        }
        Ok(())
    }
}

/// The ordered set of searches produced by the planner for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchPlan {
    /// A list of web searches to perform to best answer the query.
    pub searches: Vec<SearchItem>,
}

impl SearchPlan {
    /// Create a plan from a list of items
    pub fn new(searches: Vec<SearchItem>) -> Self {
        Self { searches }
    }

    /// Number of planned searches
    pub fn len(&self) -> usize {
        self.searches.len()
    }

    /// Whether the plan has no searches
    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// A plan must contain at least one well-formed search.
    pub fn validate(&self) -> Result<()> {
        if self.searches.is_empty() {
            return Err(AppError::InvalidInput(
                "search plan contains no searches".to_string(),
            ));
        }
        self.searches.iter().try_for_each(SearchItem::validate)
    }
}

/// The searcher's answer for one planned query.
///
/// Results are collected in completion order, so `query` is the only
/// reliable link back to the [`SearchItem`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The planned query this result answers
    pub query: String,
    /// Raw text returned by the searcher
    pub text: String,
}

impl SearchResult {
    pub fn new(query: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            text: text.into(),
        }
    }
}

/// The final research report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportData {
    /// A short 2-3 sentence summary of the findings.
    pub summary: String,
    /// The full report in markdown format.
    #[serde(alias = "report_markdown", alias = "markdown_report")]
    pub report_body: String,
    /// Suggested topics to research further.
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl ReportData {
    /// Summary and body must be present; follow-up questions may be empty.
    pub fn validate(&self) -> Result<()> {
        if self.summary.trim().is_empty() {
            return Err(AppError::InvalidInput("report summary is empty".to_string()));
        }
        if self.report_body.trim().is_empty() {
            return Err(AppError::InvalidInput("report body is empty".to_string()));
        }
        Ok(())
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    LLM(String),

    /// Transport-level failure: connection refused, timeout, rate limit, 5xx.
    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_validation_rejects_empty_plan() {
        let plan = SearchPlan::new(vec![]);
        assert!(plan.is_empty());
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("no searches"));
    }

    #[test]
    fn test_plan_validation_rejects_blank_fields() {
        let plan = SearchPlan::new(vec![
            SearchItem::new("baseline data", "coffee price history"),
            SearchItem::new("   ", "recent tariff changes coffee"),
        ]);
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("empty reason"));

        let plan = SearchPlan::new(vec![SearchItem::new("policy context", "")]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_plan_validation_accepts_single_item() {
        let plan = SearchPlan::new(vec![SearchItem::new("baseline", "coffee")]);
        assert_eq!(plan.len(), 1);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_report_accepts_report_markdown_alias() {
        let report: ReportData = serde_json::from_str(
            r##"{"summary": "s", "report_markdown": "# Report", "follow_up_questions": ["q"]}"##,
        )
        .unwrap();
        assert_eq!(report.report_body, "# Report");
        assert_eq!(report.follow_up_questions, vec!["q".to_string()]);
    }

    #[test]
    fn test_report_follow_ups_default_to_empty() {
        let report: ReportData =
            serde_json::from_str(r#"{"summary": "s", "report_body": "b"}"#).unwrap();
        assert!(report.follow_up_questions.is_empty());
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_report_validation_requires_body() {
        let report = ReportData {
            summary: "s".to_string(),
            report_body: "\n".to_string(),
            follow_up_questions: vec![],
        };
        assert!(report.validate().is_err());
    }
}
