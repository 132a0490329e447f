//! Cost command implementation

use anyhow::{Context, Result};
use sg_core::SchemaName;
use sg_metrics::{analyze_cost, CostMetrics, CostReport, Outcome};

use crate::cli::{CostArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{
    describe_no_data, format_credits, parse_period, print_json, print_key_values, print_table,
    SchemaReport,
};
use crate::context::RuntimeContext;

/// Execute the cost command
pub async fn execute(args: &CostArgs, global: &GlobalArgs) -> Result<()> {
    let period = parse_period(args.period.as_deref())?;
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;

    let records = ctx
        .source()
        .cost_records(&schema)
        .await
        .context("Failed to read cost records")?;
    let report = analyze_cost(&records, period.as_ref()).context("Failed to analyze cost")?;

    match args.output {
        OutputFormat::Json => print_json(&SchemaReport {
            schema: &schema,
            report: &report,
        })?,
        OutputFormat::Table => print_report(&schema, &report),
    }
    Ok(())
}

fn print_report(schema: &SchemaName, report: &CostReport) {
    println!("Cost for schema {}\n", schema);

    let periods: Vec<&str> = report.available_periods.iter().map(|p| p.as_str()).collect();
    let period_label = report
        .period
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "all".to_string());

    let metrics = match &report.metrics {
        Outcome::NoData { reason } => {
            println!("{}", describe_no_data("cost", reason));
            if !periods.is_empty() {
                println!("Available periods: {}", periods.join(", "));
            }
            return;
        }
        Outcome::Ready(metrics) => metrics,
    };

    print_key_values(&[
        ("Period", period_label),
        ("Available periods", periods.join(", ")),
        ("Total credits", format_credits(metrics.total_cost)),
        ("Materializations", metrics.record_count.to_string()),
        (
            "Most expensive",
            format!(
                "{} ({} credits)",
                metrics.most_expensive.model_name,
                format_credits(metrics.most_expensive.cost_credits)
            ),
        ),
    ]);

    println!();
    print_table(
        &["MODEL TYPE", "RUNS", "CREDITS"],
        &model_type_rows(metrics),
    );

    println!();
    print_table(&["MODEL", "CREDITS", "LAST RUN"], &recent_run_rows(metrics));
}

fn model_type_rows(metrics: &CostMetrics) -> Vec<Vec<String>> {
    metrics
        .cost_by_model_type
        .iter()
        .map(|t| {
            vec![
                t.model_type.clone(),
                t.record_count.to_string(),
                format_credits(t.total_cost),
            ]
        })
        .collect()
}

fn recent_run_rows(metrics: &CostMetrics) -> Vec<Vec<String>> {
    metrics
        .recent_runs
        .iter()
        .map(|r| {
            vec![
                r.model_name.to_string(),
                format_credits(r.cost_credits),
                r.last_run.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
#[path = "cost_test.rs"]
mod tests;
