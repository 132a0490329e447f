//! Summary command implementation

use anyhow::{Context, Result};
use sg_metrics::{summarize, SummaryInputs, SummaryReport};

use crate::cli::{GlobalArgs, OutputFormat, SummaryArgs};
use crate::commands::common::{parse_period, print_json, print_table, write_json_results, ExitCode};
use crate::context::RuntimeContext;

/// Execute the summary command
pub async fn execute(args: &SummaryArgs, global: &GlobalArgs) -> Result<()> {
    let period = parse_period(args.period.as_deref())?;
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;
    let snapshot = ctx.snapshot(&schema).await?;

    let inputs = SummaryInputs {
        schema: &schema,
        cost: &snapshot.cost,
        usage: &snapshot.usage,
        governance: &snapshot.governance,
        performance: &snapshot.performance,
        quality: &snapshot.quality,
        period: period.as_ref(),
    };
    let report = summarize(&inputs, ctx.now).context("Failed to summarize metrics")?;
    log::debug!(
        "Summary for {}: {} insight(s), {} warning(s)",
        schema,
        report.insights.len(),
        report.warning_count()
    );

    match args.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_report(&report),
    }

    if args.write_json {
        let path = ctx.target_dir().join("summary.json");
        write_json_results(&path, &report)?;
        if args.output == OutputFormat::Table {
            println!("\nWrote {}", path.display());
        }
    }

    if args.fail_on_warning && report.has_warnings() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

fn print_report(report: &SummaryReport) {
    println!(
        "Summary for schema {} as of {}\n",
        report.schema,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    print_table(&["CATEGORY", "SEVERITY", "INSIGHT"], &insight_rows(report));

    let warnings = report.warning_count();
    println!();
    if warnings == 0 {
        println!("No warnings.");
    } else {
        println!("{} warning(s).", warnings);
    }
}

fn insight_rows(report: &SummaryReport) -> Vec<Vec<String>> {
    report
        .insights
        .iter()
        .map(|i| vec![i.category.to_string(), i.severity.to_string(), i.text.clone()])
        .collect()
}
