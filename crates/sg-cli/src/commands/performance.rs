//! Performance command implementation

use anyhow::{Context, Result};
use sg_core::SchemaName;
use sg_metrics::{analyze_performance, Outcome, PerformanceMetrics};

use crate::cli::{GlobalArgs, OutputFormat, ReportArgs};
use crate::commands::common::{
    describe_no_data, print_json, print_key_values, print_table, SchemaReport,
};
use crate::context::RuntimeContext;

/// Execute the performance command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;

    let records = ctx
        .source()
        .performance_records(&schema)
        .await
        .context("Failed to read performance records")?;
    let performance = analyze_performance(&records).context("Failed to analyze performance")?;

    match args.output {
        OutputFormat::Json => print_json(&SchemaReport {
            schema: &schema,
            report: &performance,
        })?,
        OutputFormat::Table => print_report(&schema, &performance),
    }
    Ok(())
}

fn print_report(schema: &SchemaName, performance: &Outcome<PerformanceMetrics>) {
    println!("Performance for schema {}\n", schema);

    let metrics = match performance {
        Outcome::NoData { reason } => {
            println!("{}", describe_no_data("performance", reason));
            return;
        }
        Outcome::Ready(metrics) => metrics,
    };

    print_key_values(&[
        ("Models", metrics.total_models.to_string()),
        ("Poor pruning", metrics.pruning_issue_count().to_string()),
        ("Spilling to disk", metrics.spilling_issue_count().to_string()),
        ("Total spills", metrics.total_spill_count.to_string()),
        (
            "Mean duration",
            format!("{:.2}s", metrics.mean_query_duration_seconds),
        ),
        (
            "Slowest model",
            format!(
                "{} ({:.2}s)",
                metrics.slowest_model.model_name, metrics.slowest_model.avg_query_duration_seconds
            ),
        ),
    ]);

    if metrics.is_healthy() {
        return;
    }

    let rows: Vec<Vec<String>> = metrics
        .pruning_issue_models
        .iter()
        .map(|r| vec![r.model_name.to_string(), "poor partition pruning".to_string()])
        .chain(metrics.spilling_models.iter().map(|r| {
            vec![
                r.model_name.to_string(),
                format!("{} disk spill(s)", r.disk_spill_count),
            ]
        }))
        .collect();
    println!();
    print_table(&["MODEL", "ISSUE"], &rows);
}
