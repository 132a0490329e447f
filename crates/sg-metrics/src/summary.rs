//! Summary synthesis: turns per-domain metrics into recommendation text.
//!
//! Severity rules are fixed. Cost and usage insights are always `Info`;
//! there is no threshold alerting for them. Governance warns below
//! [`DOCUMENTATION_TARGET`](crate::DOCUMENTATION_TARGET), performance warns
//! separately for pruning and for spilling, and quality warns when any model
//! is stale.

use crate::cost::{analyze_cost, CostReport};
use crate::error::MetricsResult;
use crate::governance::{analyze_governance, GovernanceMetrics};
use crate::insight::{InsightCategory, Severity, SummaryInsight};
use crate::outcome::{NoDataReason, Outcome};
use crate::performance::{analyze_performance, PerformanceMetrics};
use crate::quality::{analyze_quality, QualityMetrics, WARNING_MAX_HOURS};
use crate::usage::{analyze_usage, UsageMetrics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sg_core::{
    CostRecord, GovernanceRecord, PerformanceRecord, PeriodKey, QualityRecord, SchemaName,
    UsageRecord,
};

/// Everything summary synthesis reads, borrowed from the caller
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    pub schema: &'a SchemaName,
    pub cost: &'a [CostRecord],
    pub usage: &'a [UsageRecord],
    pub governance: &'a [GovernanceRecord],
    pub performance: &'a [PerformanceRecord],
    pub quality: &'a [QualityRecord],

    /// Restrict cost insights to one period
    pub period: Option<&'a PeriodKey>,
}

/// Insights for one schema, ordered cost, usage, governance, performance, quality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub schema: SchemaName,
    pub generated_at: DateTime<Utc>,
    pub insights: Vec<SummaryInsight>,
}

impl SummaryReport {
    pub fn has_warnings(&self) -> bool {
        self.insights.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.insights
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

/// Run every analysis and synthesize the insight list.
pub fn summarize(inputs: &SummaryInputs<'_>, now: DateTime<Utc>) -> MetricsResult<SummaryReport> {
    let cost = analyze_cost(inputs.cost, inputs.period)?;
    let usage = analyze_usage(inputs.usage);
    let governance = analyze_governance(inputs.governance);
    let performance = analyze_performance(inputs.performance)?;
    let quality = analyze_quality(inputs.quality, now)?;

    let mut insights = Vec::new();
    insights.extend(cost_insights(&cost));
    insights.extend(usage_insights(&usage));
    insights.extend(governance_insights(&governance));
    insights.extend(performance_insights(&performance));
    insights.extend(quality_insights(&quality));

    log::debug!(
        "Summarized schema {}: {} insight(s)",
        inputs.schema,
        insights.len()
    );

    Ok(SummaryReport {
        schema: inputs.schema.clone(),
        generated_at: now,
        insights,
    })
}

fn no_data(category: InsightCategory) -> SummaryInsight {
    SummaryInsight::info(category, format!("No {} data to summarize.", category))
}

pub fn cost_insights(report: &CostReport) -> Vec<SummaryInsight> {
    let category = InsightCategory::Cost;
    let metrics = match &report.metrics {
        Outcome::Ready(m) => m,
        Outcome::NoData {
            reason: NoDataReason::NoRecordsForPeriod { period },
        } => {
            return vec![SummaryInsight::info(
                category,
                format!("No cost data for period {}.", period),
            )]
        }
        Outcome::NoData { .. } => return vec![no_data(category)],
    };

    let scope = match &report.period {
        Some(period) => format!("for period {}", period),
        None => "for the last run cycle".to_string(),
    };
    let top = &metrics.most_expensive;
    vec![SummaryInsight::info(
        category,
        format!(
            "The total estimated materialization cost {} was {:.2} credits across {} model run(s). \
             {} is the most expensive model to materialize ({:.2} credits); consider optimizing \
             its definition or refresh frequency.",
            scope, metrics.total_cost, metrics.record_count, top.model_name, top.cost_credits
        ),
    )]
}

pub fn usage_insights(usage: &Outcome<UsageMetrics>) -> Vec<SummaryInsight> {
    let category = InsightCategory::Usage;
    let Some(metrics) = usage.ready() else {
        return vec![no_data(category)];
    };

    let mut text = format!(
        "There were {} queries by {} unique users.",
        metrics.query_count, metrics.unique_user_count
    );
    if let Some(top) = metrics.top_models.first() {
        text.push_str(&format!(
            " The most queried model is {} with {} queries; ensure this model is performant \
             and up-to-date.",
            top.model_name, top.query_count
        ));
    }
    vec![SummaryInsight::info(category, text)]
}

pub fn governance_insights(governance: &Outcome<GovernanceMetrics>) -> Vec<SummaryInsight> {
    let category = InsightCategory::Governance;
    let Some(metrics) = governance.ready() else {
        return vec![no_data(category)];
    };

    let coverage = format!(
        "{:.1}% of models ({} of {}) have documentation.",
        metrics.documentation_ratio * 100.0,
        metrics.documented_count,
        metrics.total_models
    );
    if !metrics.meets_documentation_target() {
        vec![SummaryInsight::warning(
            category,
            format!(
                "{} Prioritize adding documentation (comments) to the {} undocumented model(s) \
                 to improve data discoverability and understanding.",
                coverage,
                metrics.undocumented_count()
            ),
        )]
    } else {
        vec![SummaryInsight::success(
            category,
            format!("{} Good job on model documentation!", coverage),
        )]
    }
}

pub fn performance_insights(performance: &Outcome<PerformanceMetrics>) -> Vec<SummaryInsight> {
    let category = InsightCategory::Performance;
    let Some(metrics) = performance.ready() else {
        return vec![no_data(category)];
    };

    if metrics.is_healthy() {
        return vec![SummaryInsight::success(
            category,
            "No major performance red flags (partition pruning, disk spilling) detected.",
        )];
    }

    let mut insights = Vec::with_capacity(2);
    if metrics.pruning_issue_count() > 0 {
        insights.push(SummaryInsight::warning(
            category,
            format!(
                "{} model(s) show signs of poor partition pruning. Investigate query patterns \
                 and table clustering for these models.",
                metrics.pruning_issue_count()
            ),
        ));
    }
    if metrics.spilling_issue_count() > 0 {
        insights.push(SummaryInsight::warning(
            category,
            format!(
                "{} model(s) experienced disk spilling. This can indicate queries processing \
                 large volumes of data inefficiently; review query logic and consider warehouse \
                 scaling if appropriate.",
                metrics.spilling_issue_count()
            ),
        ));
    }
    insights
}

pub fn quality_insights(quality: &Outcome<QualityMetrics>) -> Vec<SummaryInsight> {
    let category = InsightCategory::Quality;
    let Some(metrics) = quality.ready() else {
        return vec![no_data(category)];
    };

    let average = format!(
        "The average data age across models is {:.1} hours.",
        metrics.avg_freshness_hours
    );
    if metrics.stale_count > 0 {
        vec![SummaryInsight::warning(
            category,
            format!(
                "{} {} model(s) are potentially stale (refreshed more than {} hours ago). \
                 Verify their refresh schedules and investigate any failures.",
                average, metrics.stale_count, WARNING_MAX_HOURS
            ),
        )]
    } else {
        vec![SummaryInsight::success(
            category,
            format!("{} Data freshness appears to be good across models.", average),
        )]
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
