use super::*;
use crate::error::MetricsError;
use chrono::{Duration, TimeZone};
use sg_core::{ModelName, OwnerName, QueryType, SourceSystem, UserName};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn schema() -> SchemaName {
    SchemaName::new("MARKETING_DM")
}

fn perf(name: &str, pruning: bool, spills: u32) -> PerformanceRecord {
    PerformanceRecord {
        model_name: ModelName::new(name),
        poor_partition_pruning: pruning,
        disk_spill_count: spills,
        avg_query_duration_seconds: 10.0,
    }
}

fn gov(name: &str, documented: bool) -> GovernanceRecord {
    GovernanceRecord {
        model_name: ModelName::new(name),
        has_documentation: documented,
        owner: OwnerName::new("owner_a"),
    }
}

fn inputs<'a>(
    schema: &'a SchemaName,
    cost: &'a [CostRecord],
    usage: &'a [UsageRecord],
    governance: &'a [GovernanceRecord],
    performance: &'a [PerformanceRecord],
    quality: &'a [QualityRecord],
) -> SummaryInputs<'a> {
    SummaryInputs {
        schema,
        cost,
        usage,
        governance,
        performance,
        quality,
        period: None,
    }
}

#[test]
fn test_empty_inputs_yield_one_info_per_category() {
    let schema = schema();
    let report = summarize(&inputs(&schema, &[], &[], &[], &[], &[]), now()).unwrap();

    assert_eq!(report.schema, "MARKETING_DM");
    assert_eq!(report.generated_at, now());
    assert_eq!(report.insights.len(), 5);
    assert!(report.insights.iter().all(|i| i.severity == Severity::Info));
    assert_eq!(report.insights[0].text, "No cost data to summarize.");
    assert_eq!(report.insights[4].text, "No quality data to summarize.");
    assert!(!report.has_warnings());
}

#[test]
fn test_performance_healthy_is_single_success() {
    let records = vec![perf("a", false, 0), perf("b", false, 0)];
    let outcome = analyze_performance(&records).unwrap();
    let insights = performance_insights(&outcome);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Success);
}

#[test]
fn test_performance_one_pruning_issue_names_pruning_only() {
    let records = vec![perf("a", true, 0), perf("b", false, 0)];
    let outcome = analyze_performance(&records).unwrap();
    let insights = performance_insights(&outcome);

    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].severity, Severity::Warning);
    assert!(insights[0].text.contains("pruning"));
    assert!(!insights[0].text.contains("spilling"));
}

#[test]
fn test_performance_pruning_and_spilling_are_separate() {
    let records = vec![perf("a", true, 0), perf("b", false, 2), perf("c", false, 1)];
    let outcome = analyze_performance(&records).unwrap();
    let insights = performance_insights(&outcome);

    assert_eq!(insights.len(), 2);
    assert!(insights.iter().all(|i| i.severity == Severity::Warning));
    assert!(insights[0].text.starts_with("1 model(s) show signs of poor partition pruning"));
    assert!(insights[1].text.starts_with("2 model(s) experienced disk spilling"));
    assert!(!insights[1].text.contains("pruning"));
}

#[test]
fn test_governance_severity_threshold() {
    let below: Vec<GovernanceRecord> = (0..10).map(|i| gov(&format!("m{i}"), i < 7)).collect();
    let insights = governance_insights(&analyze_governance(&below));
    assert_eq!(insights[0].severity, Severity::Warning);
    assert!(insights[0].text.starts_with("70.0% of models (7 of 10)"));
    assert!(insights[0].text.contains("3 undocumented model(s)"));

    let at_target: Vec<GovernanceRecord> = (0..10).map(|i| gov(&format!("m{i}"), i < 8)).collect();
    let insights = governance_insights(&analyze_governance(&at_target));
    assert_eq!(insights[0].severity, Severity::Success);
}

#[test]
fn test_quality_severity() {
    let stale = vec![QualityRecord {
        model_name: ModelName::new("m"),
        last_refreshed: now() - Duration::hours(30),
        source_system: SourceSystem::new("source_x"),
    }];
    let insights = quality_insights(&analyze_quality(&stale, now()).unwrap());
    assert_eq!(insights[0].severity, Severity::Warning);
    assert!(insights[0].text.contains("1 model(s) are potentially stale"));
    assert!(insights[0].text.contains("more than 24 hours ago"));

    let fresh = vec![QualityRecord {
        last_refreshed: now() - Duration::hours(3),
        ..stale[0].clone()
    }];
    let insights = quality_insights(&analyze_quality(&fresh, now()).unwrap());
    assert_eq!(insights[0].severity, Severity::Success);
    assert!(insights[0].text.starts_with("The average data age across models is 3.0 hours."));
}

#[test]
fn test_cost_and_usage_always_info() {
    let cost = vec![
        CostRecord::new(ModelName::new("A"), 10.0, now()),
        CostRecord::new(ModelName::new("B"), 30.0, now()),
        CostRecord::new(ModelName::new("C"), 30.0, now()),
    ];
    let usage = vec![UsageRecord {
        timestamp: now(),
        user: UserName::new("user_1"),
        model_name: ModelName::new("A"),
        query_type: QueryType::Select,
    }];
    let schema = schema();
    let report = summarize(&inputs(&schema, &cost, &usage, &[], &[], &[]), now()).unwrap();

    let cost_insight: Vec<&SummaryInsight> = report
        .insights
        .iter()
        .filter(|i| i.category == InsightCategory::Cost)
        .collect();
    assert_eq!(cost_insight.len(), 1);
    assert_eq!(cost_insight[0].severity, Severity::Info);
    assert!(cost_insight[0].text.contains("70.00 credits across 3 model run(s)"));
    assert!(cost_insight[0].text.contains("B is the most expensive model"));

    let usage_insight: Vec<&SummaryInsight> =
        report
            .insights
            .iter()
            .filter(|i| i.category == InsightCategory::Usage)
            .collect();
    assert_eq!(usage_insight[0].severity, Severity::Info);
    assert_eq!(
        usage_insight[0].text,
        "There were 1 queries by 1 unique users. The most queried model is A with 1 queries; \
         ensure this model is performant and up-to-date."
    );
}

#[test]
fn test_cost_period_without_data() {
    let cost = vec![CostRecord::new(ModelName::new("A"), 10.0, now())];
    let period = PeriodKey::parse("2020-01").unwrap();
    let schema = schema();
    let mut summary_inputs = inputs(&schema, &cost, &[], &[], &[], &[]);
    summary_inputs.period = Some(&period);

    let report = summarize(&summary_inputs, now()).unwrap();
    assert_eq!(report.insights[0].text, "No cost data for period 2020-01.");
}

#[test]
fn test_insight_order_and_warning_count() {
    let governance = vec![gov("a", false)];
    let performance = vec![perf("a", true, 1)];
    let schema = schema();
    let report = summarize(
        &inputs(&schema, &[], &[], &governance, &performance, &[]),
        now(),
    )
    .unwrap();

    let categories: Vec<InsightCategory> = report.insights.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            InsightCategory::Cost,
            InsightCategory::Usage,
            InsightCategory::Governance,
            InsightCategory::Performance,
            InsightCategory::Performance,
            InsightCategory::Quality,
        ]
    );
    assert_eq!(report.warning_count(), 3);
    assert!(report.has_warnings());
}

#[test]
fn test_invalid_record_propagates() {
    let quality = vec![QualityRecord {
        model_name: ModelName::new("ahead"),
        last_refreshed: now() + Duration::hours(1),
        source_system: SourceSystem::new("source_y"),
    }];
    let schema = schema();
    let err = summarize(&inputs(&schema, &[], &[], &[], &[], &quality), now()).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidRecord { index: 0, .. }));
}

#[test]
fn test_summary_is_deterministic() {
    let cost = vec![CostRecord::new(ModelName::new("A"), 12.345, now())];
    let governance = vec![gov("a", true), gov("b", false)];
    let schema = schema();
    let build = || {
        let report = summarize(&inputs(&schema, &cost, &[], &governance, &[], &[]), now()).unwrap();
        serde_json::to_string(&report).unwrap()
    };
    assert_eq!(build(), build());
}
