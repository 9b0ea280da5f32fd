//! A.R.E.S Research CLI entry point
//!
//! - `ares-research run <query>` - Research a query, streaming progress
//! - `ares-research init` - Write a default research.toml
//! - `ares-research config` - Show or validate the configuration

use anyhow::{Context, Result};
use ares_research::cli::init::{self, InitConfig, InitResult};
use ares_research::cli::output::Output;
use ares_research::cli::{Cli, Commands};
use ares_research::utils::logging::init_tracing;
use ares_research::{ResearchAgents, ResearchConfig, ResearchCoordinator, ResearchError, RunEvent};
use futures::StreamExt;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Err(e) = run(cli, &output).await {
        match e.downcast_ref::<ResearchError>() {
            Some(err) => output.failure(err),
            None => output.error(&format!("{:#}", e)),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init {
            path,
            force,
            provider,
        } => match init::run(
            InitConfig {
                path,
                force,
                provider,
            },
            output,
        ) {
            InitResult::Success | InitResult::AlreadyExists => Ok(()),
            InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
        },

        Commands::Config { validate } => {
            let config = load_config(&cli.config, cli.verbose)?;
            if validate {
                output.success(&format!("{} is valid", cli.config.display()));
            } else {
                print!("{}", config.to_toml_string()?);
            }
            Ok(())
        }

        Commands::Run {
            query,
            json,
            output: report_path,
            searches,
        } => {
            let mut config = load_config(&cli.config, cli.verbose)?;
            if let Some(n) = searches {
                config.research.num_searches = n;
                config.validate()?;
            }
            run_research(&config, &query, json, report_path, output).await
        }
    }
}

fn load_config(path: &Path, verbose: bool) -> Result<ResearchConfig> {
    let config = ResearchConfig::load(path)?;
    init_tracing(&config.logging, verbose)?;
    Ok(config)
}

async fn run_research(
    config: &ResearchConfig,
    query: &str,
    json: bool,
    report_path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let agents = ResearchAgents::from_config(config).context("Failed to configure agents")?;
    let coordinator = ResearchCoordinator::new(agents);

    if !json {
        output.banner();
        output.kv("query", query);
        output.newline();
    }

    let mut events = coordinator.run(query);
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                if json {
                    println!("{}", failure_line(&err));
                }
                return Err(err.into());
            }
        };

        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            output.event(&event);
        }

        if let (RunEvent::ReportReady { report }, Some(path)) = (&event, &report_path) {
            std::fs::write(path, &report.report_body)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !json {
                output.created("report", &path.display().to_string());
            }
        }
    }

    if !json {
        output.complete("Research complete");
    }
    Ok(())
}

fn failure_line(err: &ResearchError) -> serde_json::Value {
    serde_json::json!({
        "event": "failed",
        "stage": err.stage(),
        "error": err.to_string(),
    })
}
