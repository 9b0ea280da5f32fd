//! TOML-based configuration for A.R.E.S Research
//!
//! This module provides declarative configuration for the LLM provider, the
//! three research agents, the workflow and logging via a TOML file
//! (`research.toml`). Every section is optional; a missing file yields the
//! defaults.
//!
//! ```toml
//! [provider]
//! type = "ollama"
//! base_url = "http://localhost:11434"
//! default_model = "llama3.2"
//!
//! [research]
//! num_searches = 3
//!
//! [agents.writer]
//! model = "llama3.1:70b"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use crate::llm::Provider;
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "research.toml";

/// Root configuration structure loaded from research.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// LLM provider shared by all agents
    pub provider: ProviderConfig,

    /// Workflow settings
    pub research: WorkflowSettings,

    /// Per-role agent overrides
    pub agents: AgentsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        default_model: String,
        #[serde(default = "default_request_timeout")]
        request_timeout_secs: u64,
    },
    OpenAI {
        /// Environment variable containing API key
        #[serde(default = "default_openai_key_env")]
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        #[serde(default = "default_openai_model")]
        default_model: String,
        #[serde(default = "default_request_timeout")]
        request_timeout_secs: u64,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Ollama {
            base_url: default_ollama_url(),
            default_model: default_ollama_model(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Default OpenAI settings
    pub fn openai() -> Self {
        ProviderConfig::OpenAI {
            api_key_env: default_openai_key_env(),
            api_base: default_openai_base(),
            default_model: default_openai_model(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Model used by roles that do not pin one
    pub fn default_model(&self) -> &str {
        match self {
            ProviderConfig::Ollama { default_model, .. }
            | ProviderConfig::OpenAI { default_model, .. } => default_model,
        }
    }

    /// Per-request HTTP timeout
    pub fn request_timeout(&self) -> Duration {
        match self {
            ProviderConfig::Ollama {
                request_timeout_secs,
                ..
            }
            | ProviderConfig::OpenAI {
                request_timeout_secs,
                ..
            } => Duration::from_secs(*request_timeout_secs),
        }
    }

    /// Resolve into a runtime [`Provider`] for `model`
    ///
    /// For OpenAI this reads the API key from the configured environment
    /// variable.
    pub fn resolve(&self, model: &str) -> Result<Provider> {
        match self {
            ProviderConfig::Ollama { base_url, .. } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.to_string(),
            }),
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                ..
            } => {
                let api_key = std::env::var(api_key_env).map_err(|_| {
                    AppError::Configuration(format!(
                        "Environment variable '{}' (provider.api_key_env) is not set",
                        api_key_env
                    ))
                })?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: api_base.clone(),
                    model: model.to_string(),
                })
            }
        }
    }
}

// ============= Workflow Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// How many searches the planner is asked for
    pub num_searches: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self { num_searches: 3 }
    }
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub planner: AgentOverride,
    pub searcher: AgentOverride,
    pub writer: AgentOverride,
}

/// Optional per-role settings; unset fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverride {
    /// Model name, overrides `provider.default_model`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Replacement role instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "ares_research=debug,warn"
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

// ============= Loading & Validation =============

impl ResearchConfig {
    /// Load and validate configuration from `path`
    ///
    /// A missing file is not an error: the defaults are returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            AppError::Configuration(msg) => {
                AppError::Configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResearchConfig = toml::from_str(content)
            .map_err(|e| AppError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Check the configuration for values that cannot work
    ///
    /// Does not check that an OpenAI API key is present; that happens when the
    /// provider is resolved, so `config --validate` works without secrets.
    pub fn validate(&self) -> Result<()> {
        if self.research.num_searches == 0 {
            return Err(AppError::Configuration(
                "research.num_searches must be at least 1".to_string(),
            ));
        }

        if self.provider.request_timeout().is_zero() {
            return Err(AppError::Configuration(
                "provider.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.provider.default_model().trim().is_empty() {
            return Err(AppError::Configuration(
                "provider.default_model must not be empty".to_string(),
            ));
        }

        if let ProviderConfig::OpenAI { api_key_env, .. } = &self.provider {
            if api_key_env.trim().is_empty() {
                return Err(AppError::Configuration(
                    "provider.api_key_env must not be empty".to_string(),
                ));
            }
        }

        for (role, agent) in self.agents.iter() {
            if matches!(&agent.model, Some(model) if model.trim().is_empty()) {
                return Err(AppError::Configuration(format!(
                    "agents.{}.model must not be empty",
                    role
                )));
            }
            if matches!(&agent.instructions, Some(text) if text.trim().is_empty()) {
                return Err(AppError::Configuration(format!(
                    "agents.{}.instructions must not be empty",
                    role
                )));
            }
        }

        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(AppError::Configuration(format!(
                "logging.level '{}' is not a valid filter directive",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Model a role runs on
    pub fn model_for(&self, agent: &AgentOverride) -> String {
        agent
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }
}

impl AgentsConfig {
    /// Role overrides in workflow order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AgentOverride)> {
        [
            ("planner", &self.planner),
            ("searcher", &self.searcher),
            ("writer", &self.writer),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::default();
        assert_eq!(config.research.num_searches, 3);
        assert_eq!(config.provider.default_model(), "llama3.2");
        assert_eq!(config.provider.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ResearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResearchConfig::default());
    }

    #[test]
    fn test_parse_openai_with_overrides() {
        let config = ResearchConfig::from_toml_str(
            r#"
            [provider]
            type = "openai"
            default_model = "gpt-4o-mini"

            [research]
            num_searches = 5

            [agents.writer]
            model = "gpt-4o"
            instructions = "Write tersely."

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.research.num_searches, 5);
        assert_eq!(config.model_for(&config.agents.writer), "gpt-4o");
        assert_eq!(config.model_for(&config.agents.planner), "gpt-4o-mini");
        assert_eq!(
            config.agents.writer.instructions.as_deref(),
            Some("Write tersely.")
        );
        assert_eq!(config.logging.format, LogFormat::Json);
        match &config.provider {
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                ..
            } => {
                assert_eq!(api_key_env, "OPENAI_API_KEY");
                assert_eq!(api_base, "https://api.openai.com/v1");
            }
            _ => panic!("Expected OpenAI provider"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let err = ResearchConfig::from_toml_str("[research]\nnum_searches = 0").unwrap_err();
        assert!(err.to_string().contains("num_searches"));

        let err = ResearchConfig::from_toml_str(
            "[provider]\ntype = \"ollama\"\nrequest_timeout_secs = 0",
        )
        .unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        let err = ResearchConfig::from_toml_str("[agents.searcher]\nmodel = \"  \"").unwrap_err();
        assert!(err.to_string().contains("agents.searcher.model"));

        let err = ResearchConfig::from_toml_str("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = ResearchConfig::default();
        config.agents.planner.model = Some("qwen2.5".to_string());
        let text = config.to_toml_string().unwrap();
        let parsed = ResearchConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_resolve_ollama_provider() {
        let provider = ProviderConfig::default().resolve("mistral").unwrap();
        assert_eq!(provider.name(), "Ollama");
        assert_eq!(provider.model(), "mistral");
    }

    #[test]
    fn test_resolve_openai_requires_key() {
        let config = ProviderConfig::OpenAI {
            api_key_env: "ARES_RESEARCH_TEST_UNSET_KEY".to_string(),
            api_base: default_openai_base(),
            default_model: default_openai_model(),
            request_timeout_secs: 30,
        };
        let err = config.resolve("gpt-4o-mini").unwrap_err();
        assert!(err.to_string().contains("ARES_RESEARCH_TEST_UNSET_KEY"));
    }
}
