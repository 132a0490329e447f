//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sg_core::{parse_timestamp, Config, PeriodKey, SchemaName};
use sg_metrics::NoDataReason;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; nothing should reach stderr from here.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project configuration named by the global arguments.
///
/// Returns the project root alongside the config; relative paths in the
/// config are resolved against that root.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(PathBuf, Config)> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load configuration file")?,
        None => Config::load_from_dir(&root).context("Failed to load project configuration")?,
    };
    Ok((root, config))
}

/// The evaluation instant: `--now` if given, else the wall clock.
pub(crate) fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_timestamp(raw)
            .with_context(|| {
                format!(
                    "Invalid --now timestamp '{}' (expected RFC 3339 or YYYY-MM-DD HH:MM[:SS])",
                    raw
                )
            }),
        None => Ok(Utc::now()),
    }
}

/// Parse an optional `--period` argument.
pub(crate) fn parse_period(raw: Option<&str>) -> Result<Option<PeriodKey>> {
    raw.map(|p| PeriodKey::parse(p).with_context(|| format!("Invalid --period '{}'", p)))
        .transpose()
}

/// Serialize `data` as pretty-printed JSON and write it to `path`.
///
/// Creates any missing parent directories before writing.
pub(crate) fn write_json_results<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create target directory")?;
    }
    let json = serde_json::to_string_pretty(data).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// JSON envelope labelling a report with the schema it describes
#[derive(Serialize)]
pub(crate) struct SchemaReport<'a, T: Serialize> {
    pub schema: &'a SchemaName,
    #[serde(flatten)]
    pub report: &'a T,
}

/// Print `data` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}

/// One-line explanation for an analysis with nothing to show.
pub(crate) fn describe_no_data(what: &str, reason: &NoDataReason) -> String {
    match reason {
        NoDataReason::NoRecords => format!("No {} data available.", what),
        NoDataReason::NoRecordsForPeriod { period } => {
            format!("No {} data for period {}.", what, period)
        }
    }
}

pub(crate) fn format_credits(credits: f64) -> String {
    format!("{:.2}", credits)
}

pub(crate) fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
///
/// For each column, returns the maximum width across the header and all
/// row values so that data aligns when printed with left-padding.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Render a table as lines: header, dash separator, then one line per row.
/// Columns are separated by two spaces and trailing padding is trimmed.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let widths = calculate_column_widths(headers, rows);
    let render_row = |cells: Vec<&str>| -> String {
        let parts: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.to_vec()));
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    lines.push(separator.join("  "));
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Print a formatted table to stdout.
///
/// # Examples
///
/// ```ignore
/// print_table(
///     &["MODEL", "CREDITS"],
///     &[vec!["orders".into(), "10.50".into()]],
/// );
/// // MODEL   CREDITS
/// // ------  -------
/// // orders  10.50
/// ```
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in render_table(headers, rows) {
        println!("{}", line);
    }
}

/// Print a `LABEL  value` block, labels padded to the widest.
pub(crate) fn print_key_values(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        println!("{:<width$}  {}", key, value, width = width);
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
