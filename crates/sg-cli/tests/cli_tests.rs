//! CLI integration tests for the `sg` binary
//!
//! The sample project uses an in-memory warehouse, so every command seeds it
//! from `tests/fixtures/sample_project/seeds` before reporting.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

const NOW: &str = "2024-03-02T12:00:00Z";

/// Path to the compiled sg binary (resolved at compile time)
fn sg_bin() -> String {
    env!("CARGO_BIN_EXE_sg").to_string()
}

fn sample_project_dir() -> &'static str {
    "tests/fixtures/sample_project"
}

fn sg(args: &[&str]) -> Output {
    Command::new(sg_bin())
        .args(["--project-dir", sample_project_dir(), "--now", NOW])
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SNOWGAUGE_SCHEMA")
        .output()
        .expect("Failed to run sg")
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "command failed.\nstdout: {}\nstderr: {}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

// ── sg summary ──────────────────────────────────────────────────────────

#[test]
fn test_summary_json_orders_insights_by_category() {
    let report = stdout_json(&sg(&["summary", "-o", "json"]));

    assert_eq!(report["schema"], "analytics");
    assert_eq!(report["generated_at"], "2024-03-02T12:00:00Z");

    let insights = report["insights"].as_array().unwrap();
    let pairs: Vec<(&str, &str)> = insights
        .iter()
        .map(|i| {
            (
                i["category"].as_str().unwrap(),
                i["severity"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("cost", "info"),
            ("usage", "info"),
            ("governance", "warning"),
            ("performance", "warning"),
            ("performance", "warning"),
            ("quality", "warning"),
        ]
    );

    let pruning = insights[3]["text"].as_str().unwrap();
    assert!(pruning.contains("pruning") && !pruning.contains("spilling"));
    let spilling = insights[4]["text"].as_str().unwrap();
    assert!(spilling.contains("spilling") && !spilling.contains("pruning"));
}

#[test]
fn test_summary_is_repeatable() {
    let first = sg(&["summary", "-o", "json"]);
    let second = sg(&["summary", "-o", "json"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_summary_fail_on_warning_exits_one() {
    let output = sg(&["summary", "--fail-on-warning"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CATEGORY"), "stdout: {}", stdout);
    assert!(stdout.contains("4 warning(s)."), "stdout: {}", stdout);
    // ExitCode carries no message
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_summary_partial_schema_reports_missing_tables_as_no_data() {
    let output = sg(&["summary", "--schema", "marketing", "-o", "json"]);
    let report = stdout_json(&output);

    assert_eq!(report["schema"], "marketing");
    let insights = report["insights"].as_array().unwrap();
    let rows: Vec<(&str, &str, &str)> = insights
        .iter()
        .map(|i| {
            (
                i["category"].as_str().unwrap(),
                i["severity"].as_str().unwrap(),
                i["text"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], ("cost", "info", "No cost data to summarize."));
    assert_eq!(rows[1].0, "usage");
    assert!(rows[1].2.starts_with("There were 3 queries by 2 unique users."));
    assert_eq!(rows[2], ("governance", "info", "No governance data to summarize."));
    assert_eq!(rows[3], ("performance", "info", "No performance data to summarize."));
    assert_eq!(rows[4], ("quality", "info", "No quality data to summarize."));

    // The single-dataset commands still treat a missing table as an error
    let cost = sg(&["cost", "--schema", "marketing"]);
    assert!(!cost.status.success());
    assert!(String::from_utf8_lossy(&cost.stderr).contains("[D003]"));
}

#[test]
fn test_summary_write_json() {
    let dir = tempfile::tempdir().unwrap();
    let seeds = Path::new(sample_project_dir())
        .join("seeds")
        .canonicalize()
        .unwrap();
    std::fs::write(
        dir.path().join("snowgauge.yml"),
        format!(
            "name: tmp\nschemas: [analytics]\nseed_path: {}\n",
            seeds.display()
        ),
    )
    .unwrap();

    let output = Command::new(sg_bin())
        .args(["--project-dir", &dir.path().display().to_string()])
        .args(["--now", NOW, "summary", "--write-json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = std::fs::read_to_string(dir.path().join("target/summary.json")).unwrap();
    let report: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["insights"].as_array().unwrap().len(), 6);
}

// ── sg cost ─────────────────────────────────────────────────────────────

#[test]
fn test_cost_all_periods() {
    let report = stdout_json(&sg(&["cost", "-o", "json"]));

    assert_eq!(
        report["available_periods"],
        serde_json::json!(["2024-03", "2024-02"])
    );
    assert_eq!(report["metrics"]["status"], "ready");
    assert_eq!(report["metrics"]["total_cost"], 76.75);
    // Tie at 30.0 goes to the first record read
    assert_eq!(
        report["metrics"]["most_expensive"]["model_name"],
        "dim_customers"
    );
}

#[test]
fn test_cost_period_filter() {
    let report = stdout_json(&sg(&["cost", "--period", "2024-02", "-o", "json"]));

    assert_eq!(report["period"], "2024-02");
    assert_eq!(report["metrics"]["total_cost"], 34.25);
    assert_eq!(report["metrics"]["most_expensive"]["model_name"], "stg_events");
}

#[test]
fn test_cost_period_without_records() {
    let report = stdout_json(&sg(&["cost", "--period", "2023-01", "-o", "json"]));

    assert_eq!(report["metrics"]["status"], "no_data");
    assert_eq!(report["metrics"]["reason"]["kind"], "no_records_for_period");
    assert_eq!(report["metrics"]["reason"]["period"], "2023-01");
}

#[test]
fn test_cost_invalid_period_fails() {
    let output = sg(&["cost", "--period", "March"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid --period"));
}

// ── sg usage / governance / performance / quality ───────────────────────

#[test]
fn test_usage_fills_daily_gaps() {
    let report = stdout_json(&sg(&["usage", "--schema", "marketing", "-o", "json"]));

    assert_eq!(report["schema"], "marketing");
    assert_eq!(report["query_count"], 3);
    assert_eq!(report["unique_user_count"], 2);
    let counts: Vec<u64> = report["daily_volume"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["query_count"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![1, 0, 2]);
    assert_eq!(report["daily_volume"][1]["day"], "2024-02-29");
}

#[test]
fn test_governance_table_output() {
    let output = sg(&["governance"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("75.0% (target 80.0%)"), "stdout: {}", stdout);
    assert!(stdout.contains("stg_events"));
}

#[test]
fn test_performance_json() {
    let report = stdout_json(&sg(&["performance", "-o", "json"]));
    assert_eq!(report["total_spill_count"], 3);
    assert_eq!(report["slowest_model"]["model_name"], "stg_events");
}

#[test]
fn test_quality_rows_stalest_first() {
    let report = stdout_json(&sg(&["quality", "-o", "json"]));

    assert_eq!(report["stale_count"], 1);
    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows[0]["model_name"], "dim_customers");
    assert_eq!(rows[0]["hours_since_refresh"], 25.0);
    assert_eq!(rows[0]["staleness_tier"], "stale");
    assert_eq!(rows[1]["staleness_tier"], "warning");
    assert_eq!(rows[2]["staleness_tier"], "fresh");
}

#[test]
fn test_quality_refresh_after_now_is_rejected() {
    let output = Command::new(sg_bin())
        .args(["--project-dir", sample_project_dir()])
        .args(["--now", "2024-03-01T00:00:00Z", "quality"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("M001"));
}

// ── sg schemas / seed ───────────────────────────────────────────────────

#[test]
fn test_unknown_schema_fails() {
    let output = sg(&["usage", "--schema", "finance"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("E003"));
}

#[test]
fn test_schemas_lists_seeded_schemas() {
    let entries = stdout_json(&sg(&["schemas", "-o", "json"]));
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["schema"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["analytics", "marketing"]);
    assert_eq!(entries[0]["default"], true);
}

#[test]
fn test_seed_into_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let seeds = Path::new(sample_project_dir())
        .join("seeds")
        .canonicalize()
        .unwrap();
    std::fs::write(
        dir.path().join("snowgauge.yml"),
        format!(
            "name: tmp\nschemas: [analytics, marketing]\ndatabase:\n  path: warehouse.duckdb\nseed_path: {}\n",
            seeds.display()
        ),
    )
    .unwrap();
    let project = dir.path().display().to_string();

    let seed = Command::new(sg_bin())
        .args(["--project-dir", &project, "seed", "--all-schemas"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&seed.stdout);
    assert!(seed.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("Loaded 6 seeds"), "stdout: {}", stdout);
    assert!(dir.path().join("warehouse.duckdb").exists());

    let governance = Command::new(sg_bin())
        .args(["--project-dir", &project, "governance", "-o", "json"])
        .output()
        .unwrap();
    let report = stdout_json(&governance);
    assert_eq!(report["documentation_ratio"], 0.75);
    assert_eq!(report["missing_docs"][0]["model_name"], "stg_events");
}
