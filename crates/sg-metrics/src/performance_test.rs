use super::*;
use crate::error::MetricsError;
use sg_core::ModelName;

fn perf(name: &str, pruning: bool, spills: u32, duration: f64) -> PerformanceRecord {
    PerformanceRecord {
        model_name: ModelName::new(name),
        poor_partition_pruning: pruning,
        disk_spill_count: spills,
        avg_query_duration_seconds: duration,
    }
}

#[test]
fn test_issue_lists_preserve_order() {
    let records = vec![
        perf("model_a", true, 0, 12.0),
        perf("model_b", false, 3, 40.5),
        perf("model_c", true, 1, 8.0),
        perf("model_d", false, 0, 2.0),
    ];
    let metrics = analyze_performance(&records).unwrap().into_ready().unwrap();

    let pruning: Vec<&str> = metrics
        .pruning_issue_models
        .iter()
        .map(|r| r.model_name.as_str())
        .collect();
    let spilling: Vec<&str> = metrics
        .spilling_models
        .iter()
        .map(|r| r.model_name.as_str())
        .collect();
    assert_eq!(pruning, vec!["model_a", "model_c"]);
    assert_eq!(spilling, vec!["model_b", "model_c"]);
    assert_eq!(metrics.total_spill_count, 4);
    assert!(!metrics.is_healthy());
}

#[test]
fn test_healthy_schema() {
    let records = vec![perf("a", false, 0, 1.0), perf("b", false, 0, 3.0)];
    let metrics = analyze_performance(&records).unwrap().into_ready().unwrap();
    assert!(metrics.is_healthy());
    assert_eq!(metrics.pruning_issue_count(), 0);
    assert_eq!(metrics.spilling_issue_count(), 0);
    assert_eq!(metrics.mean_query_duration_seconds, 2.0);
}

#[test]
fn test_slowest_model_first_on_tie() {
    let records = vec![
        perf("a", false, 0, 5.0),
        perf("b", false, 0, 30.0),
        perf("c", false, 0, 30.0),
    ];
    let metrics = analyze_performance(&records).unwrap().into_ready().unwrap();
    assert_eq!(metrics.slowest_model.model_name, "b");
}

#[test]
fn test_empty_performance_is_no_data() {
    assert_eq!(analyze_performance(&[]).unwrap(), Outcome::no_records());
}

#[test]
fn test_negative_duration_rejected() {
    let records = vec![perf("a", false, 0, 1.0), perf("bad", false, 0, -2.0)];
    let err = analyze_performance(&records).unwrap_err();
    let MetricsError::InvalidRecord {
        dataset,
        index,
        model,
        ..
    } = err;
    assert_eq!(dataset, RecordKind::Performance);
    assert_eq!(index, 1);
    assert_eq!(model, "bad");
}
