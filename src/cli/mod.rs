//! CLI module for A.R.E.S Research
//!
//! Provides command-line interface parsing for the ares-research binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A.R.E.S Research - plan, search and write research reports with LLM agents
#[derive(Parser, Debug)]
#[command(
    name = "ares-research",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "A.R.E.S Research - multi-agent research reports",
    long_about = "Turns a question into a search plan, runs every search concurrently,\n\
                  and writes the findings up as a long-form markdown report.",
    after_help = "EXAMPLES:\n    \
                  ares-research init                                   # Write research.toml\n    \
                  ares-research run \"impact of tariffs on coffee prices\"\n    \
                  ares-research run \"...\" --json                       # One JSON event per line\n    \
                  ares-research run \"...\" --output report.md           # Save the report\n    \
                  ares-research config --validate                      # Check research.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "research.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a query and print each stage as it completes
    Run {
        /// The question to research
        query: String,

        /// Print events as JSON lines instead of formatted text
        #[arg(long)]
        json: bool,

        /// Write the final markdown report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of searches to plan (overrides research.num_searches)
        #[arg(short = 'n', long)]
        searches: Option<usize>,
    },

    /// Write a default research.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// LLM provider to configure
        #[arg(long, value_enum, default_value_t = ProviderChoice::Ollama)]
        provider: ProviderChoice,
    },

    /// Show the effective configuration
    Config {
        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// Providers `init` can scaffold
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChoice {
    Ollama,
    #[value(name = "openai")]
    OpenAI,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
