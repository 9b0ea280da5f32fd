//! Coercion of raw agent output into typed records
//!
//! Every stage expects a particular shape back from its agent. Parsing and
//! validation happen here, at the adapter boundary, so a malformed answer
//! surfaces as [`AgentError::Invocation`] instead of leaking into the workflow.

use super::{AgentError, AgentInput, AgentSpec, CapabilityAgent};
use crate::types::{ReportData, SearchPlan};
use serde::de::DeserializeOwned;

/// A type an agent's raw output can be coerced into.
pub trait StructuredOutput: Sized + Send {
    /// Parse and validate raw output, describing the problem on failure
    fn from_output(raw: &str) -> Result<Self, String>;
}

impl StructuredOutput for String {
    fn from_output(raw: &str) -> Result<Self, String> {
        let text = raw.trim();
        if text.is_empty() {
            return Err("empty response".to_string());
        }
        Ok(text.to_string())
    }
}

impl StructuredOutput for SearchPlan {
    fn from_output(raw: &str) -> Result<Self, String> {
        let plan: SearchPlan = parse_json(raw)?;
        plan.validate().map_err(|e| e.to_string())?;
        Ok(plan)
    }
}

impl StructuredOutput for ReportData {
    fn from_output(raw: &str) -> Result<Self, String> {
        let report: ReportData = parse_json(raw)?;
        report.validate().map_err(|e| e.to_string())?;
        Ok(report)
    }
}

/// Invoke `agent` and coerce its output into `T`
pub async fn invoke_as<T: StructuredOutput>(
    agent: &dyn CapabilityAgent,
    spec: &AgentSpec,
    input: &AgentInput,
) -> Result<T, AgentError> {
    let raw = agent.invoke(spec, input).await?;
    T::from_output(&raw).map_err(|reason| AgentError::Invocation {
        agent: spec.name.clone(),
        reason,
    })
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_str(raw.trim())
        .or_else(|_| serde_json::from_str(extract_json(raw)))
        .map_err(|e| format!("malformed JSON output: {}", e))
}

/// Extract the JSON object from model output
///
/// Models often wrap JSON in a markdown code fence or add a sentence before
/// or after it. A fence is only stripped when it opens the text, so fences
/// inside JSON string values are left alone. Returns the span from the first
/// `{` to the last `}` of what remains; falls back to the trimmed text when no
/// object is found.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    let body = match trimmed.strip_prefix("```") {
        Some(after) => {
            // Skip the info string (```json)
            let start = after.find('\n').map(|pos| pos + 1).unwrap_or(0);
            let after = after[start..].trim_end();
            after.strip_suffix("```").unwrap_or(after).trim()
        }
        None => trimmed,
    };

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare(r#"{"a": 1}"#)]
    #[case::fenced("```json\n{\"a\": 1}\n```")]
    #[case::fenced_no_tag("```\n{\"a\": 1}\n```")]
    #[case::single_line_fence("```json{\"a\": 1}```")]
    #[case::prose("Here is the plan:\n{\"a\": 1}\nLet me know if you need more.")]
    fn test_extract_json(#[case] input: &str) {
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_without_object_returns_trimmed_text() {
        assert_eq!(extract_json("  no json here \n"), "no json here");
    }

    #[test]
    fn test_search_plan_from_fenced_output() {
        let raw = "```json\n{\"searches\": [{\"reason\": \"baseline data\", \"query\": \"coffee price history\"}]}\n```";
        let plan = SearchPlan::from_output(raw).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.searches[0].query, "coffee price history");
    }

    #[test]
    fn test_search_plan_rejects_empty_and_malformed() {
        let err = SearchPlan::from_output(r#"{"searches": []}"#).unwrap_err();
        assert!(err.contains("no searches"));

        let err = SearchPlan::from_output("I could not come up with a plan").unwrap_err();
        assert!(err.contains("malformed JSON"));

        let err = SearchPlan::from_output(r#"{"searches": [{"query": "x"}]}"#).unwrap_err();
        assert!(err.contains("reason"));
    }

    #[test]
    fn test_text_output_trims_and_rejects_blank() {
        assert_eq!(String::from_output("  answer \n").unwrap(), "answer");
        assert!(String::from_output(" \n\t").is_err());
    }

    #[test]
    fn test_report_from_output() {
        let raw = r##"{"summary": "Prices rose.", "report_body": "# Report\nBody", "follow_up_questions": ["What next?"]}"##;
        let report = ReportData::from_output(raw).unwrap();
        assert_eq!(report.report_body, "# Report\nBody");
        assert_eq!(report.follow_up_questions.len(), 1);
    }

    #[rstest]
    #[case::unfenced(false)]
    #[case::fenced(true)]
    fn test_report_body_keeps_code_blocks(#[case] fenced: bool) {
        let body = "# Report\n\n```python\nprint(1)\n```\n\nDone.";
        let json = serde_json::json!({
            "summary": "s",
            "report_body": body,
            "follow_up_questions": ["q"],
        })
        .to_string();
        let raw = if fenced {
            format!("```json\n{}\n```", json)
        } else {
            json
        };

        let report = ReportData::from_output(&raw).unwrap();
        assert_eq!(report.report_body, body);
        assert_eq!(report.follow_up_questions, vec!["q".to_string()]);
    }
}
