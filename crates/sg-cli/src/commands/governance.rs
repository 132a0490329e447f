//! Governance command implementation

use anyhow::{Context, Result};
use sg_core::SchemaName;
use sg_metrics::{analyze_governance, GovernanceMetrics, Outcome, DOCUMENTATION_TARGET};

use crate::cli::{GlobalArgs, OutputFormat, ReportArgs};
use crate::commands::common::{
    describe_no_data, format_percent, print_json, print_key_values, print_table, SchemaReport,
};
use crate::context::RuntimeContext;

/// Execute the governance command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let schema = ctx.schema()?;

    let records = ctx
        .source()
        .governance_records(&schema)
        .await
        .context("Failed to read governance records")?;
    let governance = analyze_governance(&records);

    match args.output {
        OutputFormat::Json => print_json(&SchemaReport {
            schema: &schema,
            report: &governance,
        })?,
        OutputFormat::Table => print_report(&schema, &governance),
    }
    Ok(())
}

fn print_report(schema: &SchemaName, governance: &Outcome<GovernanceMetrics>) {
    println!("Governance for schema {}\n", schema);

    let metrics = match governance {
        Outcome::NoData { reason } => {
            println!("{}", describe_no_data("governance", reason));
            return;
        }
        Outcome::Ready(metrics) => metrics,
    };

    print_key_values(&[
        ("Models", metrics.total_models.to_string()),
        ("Documented", metrics.documented_count.to_string()),
        (
            "Coverage",
            format!(
                "{} (target {})",
                format_percent(metrics.documentation_ratio),
                format_percent(DOCUMENTATION_TARGET)
            ),
        ),
    ]);

    if !metrics.missing_docs.is_empty() {
        println!("\nMissing documentation:");
        let rows: Vec<Vec<String>> = metrics
            .missing_docs
            .iter()
            .map(|r| vec![r.model_name.to_string(), r.owner.to_string()])
            .collect();
        print_table(&["MODEL", "OWNER"], &rows);
    }

    println!();
    let owners: Vec<Vec<String>> = metrics
        .owners
        .iter()
        .map(|o| {
            vec![
                o.owner.to_string(),
                o.model_count.to_string(),
                o.undocumented_count.to_string(),
            ]
        })
        .collect();
    print_table(&["OWNER", "MODELS", "UNDOCUMENTED"], &owners);
}
