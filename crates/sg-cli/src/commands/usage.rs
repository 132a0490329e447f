//! Usage command implementation

use anyhow::{Context, Result};
use sg_core::SchemaName;
use sg_metrics::{analyze_usage, Outcome, UsageMetrics};

use crate::cli::{GlobalArgs, OutputFormat, ReportArgs};
use crate::commands::common::{
    describe_no_data, print_json, print_key_values, print_table, SchemaReport,
};
use crate::context::RuntimeContext;

/// Execute the usage command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;

    let records = ctx
        .source()
        .usage_records(&schema)
        .await
        .context("Failed to read usage records")?;
    let usage = analyze_usage(&records);

    match args.output {
        OutputFormat::Json => print_json(&SchemaReport {
            schema: &schema,
            report: &usage,
        })?,
        OutputFormat::Table => print_report(&schema, &usage),
    }
    Ok(())
}

fn print_report(schema: &SchemaName, usage: &Outcome<UsageMetrics>) {
    println!("Usage for schema {}\n", schema);

    let metrics = match usage {
        Outcome::NoData { reason } => {
            println!("{}", describe_no_data("usage", reason));
            return;
        }
        Outcome::Ready(metrics) => metrics,
    };

    print_key_values(&[
        ("Queries", metrics.query_count.to_string()),
        ("Active users", metrics.unique_user_count.to_string()),
        ("Models queried", metrics.distinct_model_count.to_string()),
    ]);

    println!();
    let daily: Vec<Vec<String>> = metrics
        .daily_volume
        .iter()
        .map(|d| vec![d.day.to_string(), d.query_count.to_string()])
        .collect();
    print_table(&["DAY", "QUERIES"], &daily);

    println!();
    print_table(&["RANK", "MODEL", "QUERIES"], &top_model_rows(metrics));

    println!();
    let types: Vec<Vec<String>> = metrics
        .query_types
        .iter()
        .map(|t| vec![t.query_type.to_string(), t.query_count.to_string()])
        .collect();
    print_table(&["QUERY TYPE", "QUERIES"], &types);
}

fn top_model_rows(metrics: &UsageMetrics) -> Vec<Vec<String>> {
    metrics
        .top_models
        .iter()
        .enumerate()
        .map(|(i, m)| {
            vec![
                (i + 1).to_string(),
                m.model_name.to_string(),
                m.query_count.to_string(),
            ]
        })
        .collect()
}
