//! Quality command implementation

use anyhow::{Context, Result};
use sg_core::SchemaName;
use sg_metrics::{analyze_quality, Outcome, QualityMetrics};

use crate::cli::{GlobalArgs, OutputFormat, ReportArgs};
use crate::commands::common::{
    describe_no_data, print_json, print_key_values, print_table, SchemaReport,
};
use crate::context::RuntimeContext;

/// Execute the quality command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;

    let records = ctx
        .source()
        .quality_records(&schema)
        .await
        .context("Failed to read quality records")?;
    let quality = analyze_quality(&records, ctx.now).context("Failed to analyze quality")?;

    match args.output {
        OutputFormat::Json => print_json(&SchemaReport {
            schema: &schema,
            report: &quality,
        })?,
        OutputFormat::Table => print_report(&schema, &quality),
    }
    Ok(())
}

fn print_report(schema: &SchemaName, quality: &Outcome<QualityMetrics>) {
    println!("Quality for schema {}\n", schema);

    let metrics = match quality {
        Outcome::NoData { reason } => {
            println!("{}", describe_no_data("quality", reason));
            return;
        }
        Outcome::Ready(metrics) => metrics,
    };

    print_key_values(&[
        ("Average age", format!("{:.1}h", metrics.avg_freshness_hours)),
        ("Fresh", metrics.fresh_count.to_string()),
        ("Warning", metrics.warning_count.to_string()),
        ("Stale", metrics.stale_count.to_string()),
    ]);

    println!();
    print_table(
        &["MODEL", "SOURCE", "LAST REFRESHED", "HOURS", "TIER"],
        &freshness_rows(metrics),
    );
}

fn freshness_rows(metrics: &QualityMetrics) -> Vec<Vec<String>> {
    metrics
        .rows
        .iter()
        .map(|r| {
            vec![
                r.model_name.to_string(),
                r.source_system.to_string(),
                r.last_refreshed.format("%Y-%m-%d %H:%M").to_string(),
                format!("{:.1}", r.hours_since_refresh),
                r.staleness_tier.to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
#[path = "quality_test.rs"]
mod tests;
