//! Partition pruning and disk spilling analysis

use crate::error::{check_records, MetricsResult};
use crate::outcome::Outcome;
use serde::Serialize;
use sg_core::{PerformanceRecord, RecordKind};

/// Performance figures for one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_models: usize,

    /// Models flagged for poor partition pruning, input order
    pub pruning_issue_models: Vec<PerformanceRecord>,

    /// Models with at least one disk spill, input order
    pub spilling_models: Vec<PerformanceRecord>,

    pub total_spill_count: u64,
    pub mean_query_duration_seconds: f64,

    /// Highest average query duration; earliest wins a tie
    pub slowest_model: PerformanceRecord,
}

impl PerformanceMetrics {
    pub fn pruning_issue_count(&self) -> usize {
        self.pruning_issue_models.len()
    }

    pub fn spilling_issue_count(&self) -> usize {
        self.spilling_models.len()
    }

    /// No pruning issues and no spilling
    pub fn is_healthy(&self) -> bool {
        self.pruning_issue_models.is_empty() && self.spilling_models.is_empty()
    }
}

/// Analyze performance indicators.
///
/// Fails only on a record with a negative or non-finite average duration.
pub fn analyze_performance(
    records: &[PerformanceRecord],
) -> MetricsResult<Outcome<PerformanceMetrics>> {
    check_records(
        RecordKind::Performance,
        records,
        |r| &r.model_name,
        PerformanceRecord::validate,
    )?;

    let Some(slowest) = records.iter().fold(None::<&PerformanceRecord>, |best, r| {
        match best {
            Some(b) if b.avg_query_duration_seconds >= r.avg_query_duration_seconds => Some(b),
            _ => Some(r),
        }
    }) else {
        return Ok(Outcome::no_records());
    };

    let total_duration: f64 = records.iter().map(|r| r.avg_query_duration_seconds).sum();

    Ok(Outcome::Ready(PerformanceMetrics {
        total_models: records.len(),
        pruning_issue_models: records
            .iter()
            .filter(|r| r.poor_partition_pruning)
            .cloned()
            .collect(),
        spilling_models: records
            .iter()
            .filter(|r| r.disk_spill_count > 0)
            .cloned()
            .collect(),
        total_spill_count: records.iter().map(|r| u64::from(r.disk_spill_count)).sum(),
        mean_query_duration_seconds: total_duration / records.len() as f64,
        slowest_model: slowest.clone(),
    }))
}

#[cfg(test)]
#[path = "performance_test.rs"]
mod tests;
