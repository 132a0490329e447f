//! Materialization cost analysis
//!
//! Records are partitioned by reporting period (see [`CostRecord::period`]).
//! With a period selected only that month's records count; otherwise every
//! record does.

use crate::error::{check_records, MetricsResult};
use crate::outcome::{NoDataReason, Outcome};
use serde::Serialize;
use sg_core::{CostRecord, PeriodKey, RecordKind};
use std::collections::BTreeSet;

/// Bucket for records that carry no model type
pub const UNSPECIFIED_MODEL_TYPE: &str = "unspecified";

/// Cost analysis for one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    /// Distinct periods present in the input, most recent first
    pub available_periods: Vec<PeriodKey>,

    /// Period filter that was applied, if any
    pub period: Option<PeriodKey>,

    pub metrics: Outcome<CostMetrics>,
}

/// Figures derived from the active subset of cost records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostMetrics {
    pub record_count: usize,
    pub total_cost: f64,

    /// Highest-cost record; the earliest in input order wins a tie
    pub most_expensive: CostRecord,

    /// Cost per model type in order of first appearance
    pub cost_by_model_type: Vec<ModelTypeCost>,

    /// Active records ordered by `last_run`, newest first
    pub recent_runs: Vec<CostRecord>,
}

/// Total cost of the records sharing a model type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelTypeCost {
    pub model_type: String,
    pub record_count: usize,
    pub total_cost: f64,
}

/// Distinct periods in the input, sorted most recent first.
pub fn available_periods(records: &[CostRecord]) -> Vec<PeriodKey> {
    let periods: BTreeSet<PeriodKey> = records.iter().map(CostRecord::period).collect();
    periods.into_iter().rev().collect()
}

/// Analyze materialization costs, optionally restricted to one period.
///
/// Fails only on a record with a negative or non-finite cost.
pub fn analyze_cost(records: &[CostRecord], period: Option<&PeriodKey>) -> MetricsResult<CostReport> {
    check_records(RecordKind::Cost, records, |r| &r.model_name, CostRecord::validate)?;

    let available_periods = available_periods(records);
    let active: Vec<&CostRecord> = match period {
        Some(p) => records.iter().filter(|r| &r.period() == p).collect(),
        None => records.iter().collect(),
    };

    let metrics = match (compute_metrics(&active), period) {
        (Some(m), _) => Outcome::Ready(m),
        (None, Some(p)) if !records.is_empty() => Outcome::NoData {
            reason: NoDataReason::NoRecordsForPeriod { period: p.clone() },
        },
        (None, _) => Outcome::no_records(),
    };

    Ok(CostReport {
        available_periods,
        period: period.cloned(),
        metrics,
    })
}

fn compute_metrics(active: &[&CostRecord]) -> Option<CostMetrics> {
    let most_expensive = most_expensive(active)?;
    let total_cost = active.iter().map(|r| r.cost_credits).sum();

    let mut recent_runs: Vec<CostRecord> = active.iter().map(|r| (*r).clone()).collect();
    recent_runs.sort_by(|a, b| b.last_run.cmp(&a.last_run));

    Some(CostMetrics {
        record_count: active.len(),
        total_cost,
        most_expensive: most_expensive.clone(),
        cost_by_model_type: cost_by_model_type(active),
        recent_runs,
    })
}

/// First record holding the maximum cost.
fn most_expensive<'a>(active: &[&'a CostRecord]) -> Option<&'a CostRecord> {
    active.iter().copied().fold(None, |best, r| match best {
        Some(b) if b.cost_credits >= r.cost_credits => Some(b),
        _ => Some(r),
    })
}

fn cost_by_model_type(active: &[&CostRecord]) -> Vec<ModelTypeCost> {
    let mut groups: Vec<ModelTypeCost> = Vec::new();
    for record in active {
        let model_type = record
            .model_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNSPECIFIED_MODEL_TYPE);
        match groups.iter_mut().find(|g| g.model_type == model_type) {
            Some(group) => {
                group.record_count += 1;
                group.total_cost += record.cost_credits;
            }
            None => groups.push(ModelTypeCost {
                model_type: model_type.to_string(),
                record_count: 1,
                total_cost: record.cost_credits,
            }),
        }
    }
    groups
}

#[cfg(test)]
#[path = "cost_test.rs"]
mod tests;
