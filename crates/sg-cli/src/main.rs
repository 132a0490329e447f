//! Snowgauge CLI - schema health metrics for a data warehouse

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::common::ExitCode;
use commands::{cost, governance, performance, quality, schemas, seed, summary, usage};

/// Install the fmt subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. under a test harness) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Cost(args) => cost::execute(args, &cli.global).await,
        cli::Commands::Usage(args) => usage::execute(args, &cli.global).await,
        cli::Commands::Governance(args) => governance::execute(args, &cli.global).await,
        cli::Commands::Performance(args) => performance::execute(args, &cli.global).await,
        cli::Commands::Quality(args) => quality::execute(args, &cli.global).await,
        cli::Commands::Summary(args) => summary::execute(args, &cli.global).await,
        cli::Commands::Schemas(args) => schemas::execute(args, &cli.global).await,
        cli::Commands::Seed(args) => seed::execute(args, &cli.global).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(&cli).await {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
