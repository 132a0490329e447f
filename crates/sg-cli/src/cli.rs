//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Snowgauge - schema health metrics for a data warehouse
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Warehouse schema to report on (default: config default_schema)
    #[arg(short, long, global = true, env = "SNOWGAUGE_SCHEMA")]
    pub schema: Option<String>,

    /// Evaluate as of this instant instead of the current time
    /// (RFC 3339, or `YYYY-MM-DD HH:MM[:SS]` read as UTC)
    #[arg(long, global = true)]
    pub now: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Materialization cost for a period
    Cost(CostArgs),

    /// Query volume, users and most-queried models
    Usage(ReportArgs),

    /// Documentation coverage and ownership
    Governance(ReportArgs),

    /// Partition pruning and disk spilling issues
    Performance(ReportArgs),

    /// Data freshness per model
    Quality(ReportArgs),

    /// Recommendations across every category
    Summary(SummaryArgs),

    /// List warehouse schemas that contain monitoring tables
    Schemas(ReportArgs),

    /// Load CSV seed files into the warehouse
    Seed(SeedArgs),
}

/// Output formats shared by the reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// JSON output
    Json,
}

/// Arguments for commands that only choose an output format
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the cost command
#[derive(Args, Debug)]
pub struct CostArgs {
    /// Restrict to one period (YYYY-MM)
    #[arg(long)]
    pub period: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Restrict cost insights to one period (YYYY-MM)
    #[arg(long)]
    pub period: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Also write the report to <target_path>/summary.json
    #[arg(long)]
    pub write_json: bool,

    /// Exit with status 1 when any insight is a warning
    #[arg(long)]
    pub fail_on_warning: bool,
}

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Seed every schema directory instead of only the selected schema
    #[arg(long)]
    pub all_schemas: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
