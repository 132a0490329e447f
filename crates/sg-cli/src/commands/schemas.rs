//! Schemas command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sg_core::{Config, SchemaName};

use crate::cli::{GlobalArgs, OutputFormat, ReportArgs};
use crate::commands::common::{print_json, print_table, yes_no};
use crate::context::RuntimeContext;

/// One schema known to the warehouse, the config, or both
#[derive(Debug, Serialize, PartialEq)]
struct SchemaEntry {
    schema: SchemaName,
    in_warehouse: bool,
    configured: bool,
    default: bool,
}

/// Warehouse schemas first (sorted), then configured schemas the
/// warehouse does not have, in config order.
fn merge_schemas(warehouse: Vec<SchemaName>, config: &Config) -> Vec<SchemaEntry> {
    let default = config.resolve_schema(None).ok();
    let entry = |schema: SchemaName, in_warehouse: bool| SchemaEntry {
        configured: config.schemas.contains(&schema),
        default: default.as_ref() == Some(&schema),
        in_warehouse,
        schema,
    };

    let missing: Vec<SchemaName> = config
        .schemas
        .iter()
        .filter(|s| !warehouse.contains(s))
        .cloned()
        .collect();

    warehouse
        .into_iter()
        .map(|s| entry(s, true))
        .chain(missing.into_iter().map(|s| entry(s, false)))
        .collect()
}

/// Execute the schemas command
pub async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    let warehouse = ctx
        .source()
        .list_schemas()
        .await
        .context("Failed to list warehouse schemas")?;
    let entries = merge_schemas(warehouse, &ctx.config);

    match args.output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No schemas found.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|e| {
                    vec![
                        e.schema.to_string(),
                        yes_no(e.in_warehouse).to_string(),
                        yes_no(e.configured).to_string(),
                        if e.default { "*" } else { "" }.to_string(),
                    ]
                })
                .collect();
            print_table(&["SCHEMA", "IN WAREHOUSE", "CONFIGURED", "DEFAULT"], &rows);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "schemas_test.rs"]
mod tests;
