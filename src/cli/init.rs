//! Init command implementation
//!
//! Writes a commented `research.toml` (and, for OpenAI, a `.env.example`).

use super::output::Output;
use super::ProviderChoice;
use crate::utils::toml_config::DEFAULT_CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// research.toml already exists
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// LLM provider to configure
    pub provider: ProviderChoice,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing research configuration");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() && !config.force {
        output.warning(&format!("{} already exists!", DEFAULT_CONFIG_FILE));
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = write_file(&config_path, &generate_research_toml(config.provider), config.force) {
        output.error(&format!("Failed to create {}: {}", DEFAULT_CONFIG_FILE, e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", DEFAULT_CONFIG_FILE);

    if config.provider == ProviderChoice::OpenAI {
        let env_path = base_path.join(".env.example");
        if env_path.exists() && !config.force {
            output.skipped(".env.example", "already exists");
        } else if let Err(e) = write_file(&env_path, &generate_env_example(), config.force) {
            output.error(&format!("Failed to create .env.example: {}", e));
            return InitResult::Error(e.to_string());
        } else {
            output.created("env", ".env.example");
        }
    }

    output.complete("Research configuration written!");

    output.header("Next Steps");
    output.newline();
    match config.provider {
        ProviderChoice::Ollama => {
            output.info("1. Start Ollama (if not running):");
            output.command("ollama serve");
            output.command("ollama pull llama3.2");
        }
        ProviderChoice::OpenAI => {
            output.info("1. Set your API key:");
            output.command("cp .env.example .env");
            output.command("# Edit .env and set OPENAI_API_KEY");
        }
    }
    output.newline();
    output.info("2. Run a research query:");
    output.command("ares-research run \"impact of tariffs on coffee prices\"");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_research_toml(provider: ProviderChoice) -> String {
    let provider_section = match provider {
        ProviderChoice::Ollama => {
            r#"[provider]
type = "ollama"
base_url = "http://localhost:11434"
default_model = "llama3.2"
request_timeout_secs = 120"#
        }
        ProviderChoice::OpenAI => {
            r#"# API key is read from the environment (or .env)
[provider]
type = "openai"
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
default_model = "gpt-4o-mini"
request_timeout_secs = 120"#
        }
    };

    format!(
        r#"# A.R.E.S Research configuration

{provider_section}

[research]
# How many searches the planner is asked for
num_searches = 3

# Per-role overrides. Unset fields use the provider default model and the
# built-in instructions.
[agents.planner]

[agents.searcher]

[agents.writer]
# model = "a-larger-model"

[logging]
# Filter directive; RUST_LOG takes precedence
level = "info"
# "pretty" or "json"
format = "pretty"
"#
    )
}

fn generate_env_example() -> String {
    r#"# A.R.E.S Research Environment Variables
# Copy this file to .env and fill in the values.

# REQUIRED for the openai provider
OPENAI_API_KEY=sk-...

# Optional: Logging filter (overrides [logging].level)
RUST_LOG=info,ares_research=debug
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::{ProviderConfig, ResearchConfig};
    use tempfile::TempDir;

    fn init_config(temp_dir: &TempDir, provider: ProviderChoice, force: bool) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force,
            provider,
        }
    }

    #[test]
    fn test_generated_toml_parses() {
        let config = ResearchConfig::from_toml_str(&generate_research_toml(ProviderChoice::Ollama))
            .expect("generated ollama config should parse");
        assert_eq!(config, ResearchConfig::default());

        let config = ResearchConfig::from_toml_str(&generate_research_toml(ProviderChoice::OpenAI))
            .expect("generated openai config should parse");
        assert_eq!(config.provider, ProviderConfig::openai());
    }

    #[test]
    fn test_generate_env_example() {
        let content = generate_env_example();
        assert!(content.contains("OPENAI_API_KEY"));
        assert!(content.contains("RUST_LOG"));
    }

    #[test]
    fn test_write_file_skips_existing_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "original").expect("Failed to write");

        write_file(&file_path, "new content", false).expect("write should succeed");
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "original");

        write_file(&file_path, "new content", true).expect("write should succeed");
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }

    #[test]
    fn test_run_ollama() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = run(
            init_config(&temp_dir, ProviderChoice::Ollama, false),
            &Output::no_color(),
        );

        assert_eq!(result, InitResult::Success);
        assert!(temp_dir.path().join(DEFAULT_CONFIG_FILE).exists());
        assert!(!temp_dir.path().join(".env.example").exists());
    }

    #[test]
    fn test_run_openai_writes_env_example() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = run(
            init_config(&temp_dir, ProviderChoice::OpenAI, false),
            &Output::no_color(),
        );

        assert_eq!(result, InitResult::Success);
        let content = fs::read_to_string(temp_dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(content.contains("type = \"openai\""));
        assert!(temp_dir.path().join(".env.example").exists());
    }

    #[test]
    fn test_run_already_exists_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "existing").expect("Failed to write");

        let result = run(
            init_config(&temp_dir, ProviderChoice::Ollama, false),
            &Output::no_color(),
        );
        assert_eq!(result, InitResult::AlreadyExists);
    }

    #[test]
    fn test_run_force_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "existing").expect("Failed to write");

        let result = run(
            init_config(&temp_dir, ProviderChoice::Ollama, true),
            &Output::no_color(),
        );
        assert_eq!(result, InitResult::Success);

        let content = fs::read_to_string(temp_dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(content.contains("[research]"));
        assert!(!content.contains("existing"));
    }
}
