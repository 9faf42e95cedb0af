use clap::{Parser, Subcommand};

/// AI-assisted code review, test generation and reporting dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "devassist", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Project root that component, report and test directories are relative to
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Path to config file (default: <root>/.devassist.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory scanned for component sources (default: src/components)
    #[arg(long, global = true)]
    pub components_dir: Option<String>,

    /// Directory reports and the dashboard are written to (default: reports)
    #[arg(long, global = true)]
    pub reports_dir: Option<String>,

    /// Directory generated test files are written under (default: tests)
    #[arg(long, global = true)]
    pub tests_dir: Option<String>,

    /// Chat-completion endpoint
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Model to try, in order; repeat to build a ranked list
    #[arg(long = "model", global = true)]
    pub models: Vec<String>,

    /// Request deadline in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory holding prompt template overrides
    #[arg(long, global = true)]
    pub prompts_dir: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Review component files and write reports/code_review_report.md
    Review,

    /// Generate test skeletons and write reports/test_generation_report.md
    GenTests,

    /// Render reports/index.html from the existing reports
    Dashboard,

    /// Run review, test generation and dashboard in sequence
    All,
}
