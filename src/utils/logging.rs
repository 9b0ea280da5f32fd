//! Tracing subscriber setup for the CLI
//!
//! Logs always go to stderr so `run --json` keeps stdout to event lines.

use super::toml_config::{LogFormat, LoggingConfig};
use crate::types::{AppError, Result};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive in effect: `RUST_LOG`, else debug under `--verbose`,
/// else the configured level.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => "ares_research=debug,info".to_string(),
        _ => config.level.clone(),
    }
}

/// Install the global subscriber
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let directive = filter_directive(config, verbose);
    let env_filter = EnvFilter::try_new(&directive).map_err(|e| {
        AppError::Configuration(format!("Invalid log filter '{}': {}", directive, e))
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(verbose)
                    .with_thread_ids(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE })
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::Configuration(format!("Failed to initialize logging: {}", e)))
}
