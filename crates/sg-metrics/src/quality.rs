//! Data freshness analysis
//!
//! Age is measured against an explicit evaluation instant, never the system
//! clock. A refresh recorded after that instant is rejected as an invalid
//! record rather than clamped, so a skewed loader clock surfaces as an error.

use crate::error::{check_records, MetricsResult};
use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sg_core::{ModelName, QualityRecord, RecordKind, SourceSystem};
use std::fmt;

/// Upper bound (inclusive) of the Fresh tier, in hours
pub const FRESH_MAX_HOURS: f64 = 12.0;

/// Upper bound (inclusive) of the Warning tier, in hours
pub const WARNING_MAX_HOURS: f64 = 24.0;

/// Freshness bucket derived from hours since the last refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StalenessTier {
    /// At most 12 hours old
    Fresh,
    /// Over 12 and at most 24 hours old
    Warning,
    /// Over 24 hours old
    Stale,
}

impl StalenessTier {
    pub fn from_hours(hours: f64) -> Self {
        if hours <= FRESH_MAX_HOURS {
            StalenessTier::Fresh
        } else if hours <= WARNING_MAX_HOURS {
            StalenessTier::Warning
        } else {
            StalenessTier::Stale
        }
    }
}

impl fmt::Display for StalenessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StalenessTier::Fresh => write!(f, "fresh"),
            StalenessTier::Warning => write!(f, "warning"),
            StalenessTier::Stale => write!(f, "stale"),
        }
    }
}

/// Freshness of one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreshnessRow {
    pub model_name: ModelName,
    pub source_system: SourceSystem,
    pub last_refreshed: DateTime<Utc>,

    /// Rounded to one decimal place
    pub hours_since_refresh: f64,
    pub staleness_tier: StalenessTier,
}

/// Freshness figures for one schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityMetrics {
    /// Most stale first; equal ages keep input order
    pub rows: Vec<FreshnessRow>,

    /// Mean of the rounded per-model ages
    pub avg_freshness_hours: f64,

    pub fresh_count: usize,
    pub warning_count: usize,
    pub stale_count: usize,
}

/// Hours between `last_refreshed` and `now`, rounded to one decimal.
///
/// Callers must ensure `last_refreshed <= now`; [`analyze_quality`] does.
pub fn hours_since_refresh(last_refreshed: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(last_refreshed).num_milliseconds();
    let hours = millis as f64 / 3_600_000.0;
    (hours * 10.0).round() / 10.0
}

/// Analyze freshness as of `now`.
pub fn analyze_quality(
    records: &[QualityRecord],
    now: DateTime<Utc>,
) -> MetricsResult<Outcome<QualityMetrics>> {
    check_records(
        RecordKind::Quality,
        records,
        |r| &r.model_name,
        |r| r.validate_at(now),
    )?;

    if records.is_empty() {
        return Ok(Outcome::no_records());
    }

    let mut rows: Vec<FreshnessRow> = records
        .iter()
        .map(|r| {
            let hours = hours_since_refresh(r.last_refreshed, now);
            FreshnessRow {
                model_name: r.model_name.clone(),
                source_system: r.source_system.clone(),
                last_refreshed: r.last_refreshed,
                hours_since_refresh: hours,
                staleness_tier: StalenessTier::from_hours(hours),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.hours_since_refresh.total_cmp(&a.hours_since_refresh));

    let tier_count = |tier: StalenessTier| rows.iter().filter(|r| r.staleness_tier == tier).count();
    let total_hours: f64 = rows.iter().map(|r| r.hours_since_refresh).sum();

    Ok(Outcome::Ready(QualityMetrics {
        avg_freshness_hours: total_hours / rows.len() as f64,
        fresh_count: tier_count(StalenessTier::Fresh),
        warning_count: tier_count(StalenessTier::Warning),
        stale_count: tier_count(StalenessTier::Stale),
        rows,
    }))
}

#[cfg(test)]
#[path = "quality_test.rs"]
mod tests;
