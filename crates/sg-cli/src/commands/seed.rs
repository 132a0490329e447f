//! Seed command implementation
//!
//! Seeds live at `<seed_path>/<schema>/<table>.csv`; each file replaces the
//! matching table in that schema.

use anyhow::{Context, Result};
use sg_core::{RecordKind, SchemaName, TableNames};
use sg_db::duckdb::quote_qualified;
use sg_db::Database;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, SeedArgs};
use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// A discovered seed file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeedFile {
    pub schema: SchemaName,
    /// Table name (filename without .csv extension)
    pub table: String,
    pub path: PathBuf,
}

impl SeedFile {
    fn qualified_table(&self) -> String {
        quote_qualified(&self.schema, &self.table)
    }
}

fn is_monitoring_table(tables: &TableNames, name: &str) -> bool {
    RecordKind::ALL
        .iter()
        .any(|kind| tables.table_for(*kind) == name)
}

/// Find seed files under `seed_root`, optionally for one schema only.
///
/// CSV files whose name is not a configured monitoring table are skipped.
pub(crate) fn discover_in(
    seed_root: &Path,
    tables: &TableNames,
    only: Option<&SchemaName>,
) -> Result<Vec<SeedFile>> {
    if !seed_root.is_dir() {
        log::debug!("Seed directory {} does not exist", seed_root.display());
        return Ok(Vec::new());
    }

    let mut seeds = Vec::new();
    let schema_dirs = std::fs::read_dir(seed_root)
        .with_context(|| format!("Failed to read {}", seed_root.display()))?;

    for entry in schema_dirs.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(schema) = dir
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(SchemaName::try_new)
        else {
            continue;
        };
        if only.is_some_and(|wanted| *wanted != schema) {
            continue;
        }

        let files = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?;
        for file in files.flatten() {
            let path = file.path();
            if !path.extension().is_some_and(|e| e == "csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_monitoring_table(tables, stem) {
                log::warn!("Skipping {}: not a monitoring table", path.display());
                continue;
            }
            seeds.push(SeedFile {
                schema: schema.clone(),
                table: stem.to_string(),
                path,
            });
        }
    }

    // read_dir order is platform-dependent
    seeds.sort_by(|a, b| (&a.schema, &a.table).cmp(&(&b.schema, &b.table)));
    Ok(seeds)
}

/// Seed files for the project in `ctx`
pub(crate) fn discover_seeds(
    ctx: &RuntimeContext,
    only: Option<&SchemaName>,
) -> Result<Vec<SeedFile>> {
    let seed_root = ctx.config.seed_path_absolute(&ctx.root);
    discover_in(&seed_root, &ctx.config.tables, only)
}

/// Load one seed file and return its row count
pub(crate) async fn load_seed(db: &dyn Database, seed: &SeedFile) -> Result<usize> {
    db.create_schema_if_not_exists(&seed.schema)
        .await
        .with_context(|| format!("Failed to create schema {}", seed.schema))?;

    let table = seed.qualified_table();
    let path = seed.path.display().to_string();
    db.load_csv(&table, &path)
        .await
        .with_context(|| format!("Failed to load seed {}", path))?;

    let rows = db
        .query_count(&format!("SELECT * FROM {}", table))
        .await
        .with_context(|| format!("Failed to count rows in {}", table))?;
    Ok(rows)
}

/// Execute the seed command
pub async fn execute(args: &SeedArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::connect(global)?;
    let only = if args.all_schemas {
        None
    } else {
        Some(ctx.schema()?)
    };

    let seeds = discover_seeds(&ctx, only.as_ref())?;
    if seeds.is_empty() {
        println!(
            "No seed files found in {}.",
            ctx.config.seed_path_absolute(&ctx.root).display()
        );
        return Ok(());
    }

    if ctx.config.is_in_memory() {
        log::warn!("database.path is :memory:, seeded tables are discarded on exit");
    }

    println!("Loading {} seeds...\n", seeds.len());

    let mut success_count = 0;
    let mut failure_count = 0;
    let mut total_rows: usize = 0;

    for seed in &seeds {
        match load_seed(ctx.database(), seed).await {
            Ok(rows) => {
                success_count += 1;
                total_rows += rows;
                println!("  ✓ {}.{} ({} rows)", seed.schema, seed.table, rows);
            }
            Err(e) => {
                failure_count += 1;
                println!("  ✗ {}.{} - {:#}", seed.schema, seed.table, e);
            }
        }
    }

    println!();
    println!("Loaded {} seeds ({} total rows)", success_count, total_rows);

    if failure_count > 0 {
        return Err(ExitCode(4).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;
