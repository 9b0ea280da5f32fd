//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the A.R.E.S Research CLI,
//! including rendering of run events as they stream in.

use crate::research::{ResearchError, RunEvent};
use crate::types::{ReportData, SearchPlan, SearchResult};
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n",
                "A.R.E.S Research".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n   A.R.E.S Research v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(&self, step_num: u32, total: u32, message: &str) {
        if self.colored {
            println!(
                "  {} {}",
                format!("[{}/{}]", step_num, total).dimmed(),
                message.bright_white()
            );
        } else {
            println!("  [{}/{}] {}", step_num, total, message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print completion message
    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }

    // ============= Run Events =============

    /// Render one run event
    pub fn event(&self, event: &RunEvent) {
        match event {
            RunEvent::Started { correlation_id } => {
                self.step(0, 3, "Starting research");
                self.kv("trace id", &correlation_id.to_string());
            }
            RunEvent::PlanReady { plan } => self.plan(plan),
            RunEvent::SearchesComplete { results } => self.results(results),
            RunEvent::ReportReady { report } => self.report(report),
        }
    }

    /// Render a search plan
    pub fn plan(&self, plan: &SearchPlan) {
        self.step(1, 3, &format!("Planned {} searches", plan.len()));
        for item in &plan.searches {
            self.list_item(&format!("{} ({})", item.query, item.reason));
        }
    }

    /// Render collected search results
    pub fn results(&self, results: &[SearchResult]) {
        self.step(2, 3, &format!("Completed {} searches", results.len()));
        for result in results {
            self.list_item(&format!(
                "{}: {} chars",
                result.query,
                result.text.chars().count()
            ));
        }
    }

    /// Render the final report
    pub fn report(&self, report: &ReportData) {
        self.step(3, 3, "Report ready");

        self.header("Summary");
        println!("\n  {}", report.summary.trim());

        self.header("Report");
        println!("\n{}", report.report_body.trim_end());

        if !report.follow_up_questions.is_empty() {
            self.subheader("Follow-up questions");
            for question in &report.follow_up_questions {
                self.list_item(question);
            }
        }
    }

    /// Render a run failure, naming the stage that failed
    pub fn failure(&self, err: &ResearchError) {
        let message = match err.stage() {
            Some(stage) => format!("Research failed during {}: {}", stage, err),
            None => format!("Research failed: {}", err),
        };
        self.error(&message);
        if err.is_unavailable() {
            self.hint("The LLM provider could not be reached; check [provider] in research.toml");
        }
    }
}
