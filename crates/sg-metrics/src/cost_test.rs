use super::*;
use crate::error::MetricsError;
use chrono::{DateTime, TimeZone, Utc};
use sg_core::{ModelName, RecordViolation};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 6, 0, 0).unwrap()
}

fn record(name: &str, cost: f64) -> CostRecord {
    CostRecord::new(ModelName::new(name), cost, at(2024, 5, 10))
}

fn period(s: &str) -> PeriodKey {
    PeriodKey::parse(s).unwrap()
}

#[test]
fn test_total_and_tied_most_expensive() {
    let records = vec![record("A", 10.0), record("B", 30.0), record("C", 30.0)];
    let report = analyze_cost(&records, None).unwrap();
    let metrics = report.metrics.ready().unwrap();

    assert_eq!(metrics.total_cost, 70.0);
    assert_eq!(metrics.record_count, 3);
    assert_eq!(metrics.most_expensive.model_name, "B");
}

#[test]
fn test_most_expensive_dominates_subset() {
    let records = vec![
        record("A", 12.25),
        record("B", 48.0),
        record("C", 5.5),
        record("D", 47.99),
    ];
    let report = analyze_cost(&records, None).unwrap();
    let metrics = report.metrics.ready().unwrap();

    let expected_total: f64 = records.iter().map(|r| r.cost_credits).sum();
    assert_eq!(metrics.total_cost, expected_total);
    assert!(records
        .iter()
        .all(|r| metrics.most_expensive.cost_credits >= r.cost_credits));
    assert_eq!(metrics.most_expensive.model_name, "B");
}

#[test]
fn test_empty_input_is_no_data() {
    let report = analyze_cost(&[], None).unwrap();
    assert!(report.available_periods.is_empty());
    assert_eq!(
        report.metrics,
        Outcome::NoData {
            reason: NoDataReason::NoRecords
        }
    );
}

#[test]
fn test_period_filter_restricts_subset() {
    let records = vec![
        CostRecord::new(ModelName::new("A"), 10.0, at(2024, 4, 30)),
        CostRecord::new(ModelName::new("B"), 20.0, at(2024, 5, 1)),
        CostRecord::new(ModelName::new("C"), 5.0, at(2024, 5, 20)),
    ];
    let report = analyze_cost(&records, Some(&period("2024-05"))).unwrap();
    let metrics = report.metrics.ready().unwrap();

    assert_eq!(report.period, Some(period("2024-05")));
    assert_eq!(metrics.record_count, 2);
    assert_eq!(metrics.total_cost, 25.0);
    assert_eq!(metrics.most_expensive.model_name, "B");
}

#[test]
fn test_period_without_records_reports_no_data_for_period() {
    let records = vec![record("A", 10.0)];
    let report = analyze_cost(&records, Some(&period("2023-01"))).unwrap();

    assert_eq!(
        report.metrics,
        Outcome::NoData {
            reason: NoDataReason::NoRecordsForPeriod {
                period: period("2023-01")
            }
        }
    );
    assert_eq!(report.available_periods, vec![period("2024-05")]);
}

#[test]
fn test_available_periods_sorted_descending() {
    let records = vec![
        CostRecord::new(ModelName::new("A"), 1.0, at(2024, 2, 1)),
        CostRecord::new(ModelName::new("B"), 1.0, at(2024, 11, 1)),
        CostRecord::new(ModelName::new("C"), 1.0, at(2023, 12, 1)),
        CostRecord::new(ModelName::new("D"), 1.0, at(2024, 2, 15)),
    ];
    let periods = available_periods(&records);
    let as_str: Vec<&str> = periods.iter().map(|p| p.as_str()).collect();
    assert_eq!(as_str, vec!["2024-11", "2024-02", "2023-12"]);
}

#[test]
fn test_explicit_period_key_used_for_filter() {
    let records = vec![
        CostRecord::new(ModelName::new("A"), 4.0, at(2024, 6, 1)).with_period_key(period("2024-05")),
        CostRecord::new(ModelName::new("B"), 6.0, at(2024, 6, 1)),
    ];
    let report = analyze_cost(&records, Some(&period("2024-05"))).unwrap();
    let metrics = report.metrics.ready().unwrap();
    assert_eq!(metrics.record_count, 1);
    assert_eq!(metrics.most_expensive.model_name, "A");
}

#[test]
fn test_negative_cost_is_invalid_record() {
    let records = vec![record("A", 10.0), record("B", -3.0)];
    let err = analyze_cost(&records, None).unwrap_err();
    assert_eq!(
        err,
        MetricsError::InvalidRecord {
            dataset: RecordKind::Cost,
            index: 1,
            model: ModelName::new("B"),
            violation: RecordViolation::NegativeCost(-3.0),
        }
    );
}

#[test]
fn test_cost_by_model_type_in_first_seen_order() {
    let records = vec![
        record("A", 10.0).with_model_type("table"),
        record("B", 2.0),
        record("C", 5.0).with_model_type("incremental"),
        record("D", 1.0).with_model_type("table"),
    ];
    let report = analyze_cost(&records, None).unwrap();
    let groups = &report.metrics.ready().unwrap().cost_by_model_type;

    let names: Vec<&str> = groups.iter().map(|g| g.model_type.as_str()).collect();
    assert_eq!(names, vec!["table", UNSPECIFIED_MODEL_TYPE, "incremental"]);
    assert_eq!(groups[0].record_count, 2);
    assert_eq!(groups[0].total_cost, 11.0);
}

#[test]
fn test_recent_runs_newest_first() {
    let records = vec![
        CostRecord::new(ModelName::new("old"), 1.0, at(2024, 5, 1)),
        CostRecord::new(ModelName::new("new"), 1.0, at(2024, 5, 9)),
        CostRecord::new(ModelName::new("mid"), 1.0, at(2024, 5, 4)),
    ];
    let report = analyze_cost(&records, None).unwrap();
    let order: Vec<&str> = report
        .metrics
        .ready()
        .unwrap()
        .recent_runs
        .iter()
        .map(|r| r.model_name.as_str())
        .collect();
    assert_eq!(order, vec!["new", "mid", "old"]);
}

#[test]
fn test_repeated_calls_identical() {
    let records = vec![record("A", 10.0), record("B", 30.0).with_model_type("view")];
    let first = serde_json::to_string(&analyze_cost(&records, None).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze_cost(&records, None).unwrap()).unwrap();
    assert_eq!(first, second);
}
