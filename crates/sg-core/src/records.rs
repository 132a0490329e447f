//! Typed warehouse records consumed by the metrics engine.
//!
//! Each record mirrors one row of a monitoring dataset. Records are plain
//! immutable data; field constraints that the type system cannot express
//! (non-negative costs, refresh times not in the future) are checked by the
//! `validate` methods and reported as [`RecordViolation`]s.

use crate::names::{ModelName, OwnerName, SourceSystem, UserName};
use crate::period::PeriodKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The dataset a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Cost,
    Usage,
    Governance,
    Performance,
    Quality,
}

impl RecordKind {
    /// All dataset kinds in reporting order
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Cost,
        RecordKind::Usage,
        RecordKind::Governance,
        RecordKind::Performance,
        RecordKind::Quality,
    ];
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Cost => write!(f, "cost"),
            RecordKind::Usage => write!(f, "usage"),
            RecordKind::Governance => write!(f, "governance"),
            RecordKind::Performance => write!(f, "performance"),
            RecordKind::Quality => write!(f, "quality"),
        }
    }
}

/// A field constraint broken by a single record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordViolation {
    /// cost_credits below zero
    #[error("cost_credits must be >= 0, got {0}")]
    NegativeCost(f64),

    /// avg_query_duration_seconds below zero
    #[error("avg_query_duration_seconds must be >= 0, got {0}")]
    NegativeDuration(f64),

    /// NaN or infinite numeric field
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// last_refreshed later than the evaluation instant
    #[error("last_refreshed {last_refreshed} is after the evaluation time {now}")]
    RefreshedInFuture {
        last_refreshed: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

fn check_non_negative(
    field: &'static str,
    value: f64,
    negative: fn(f64) -> RecordViolation,
) -> Result<(), RecordViolation> {
    if !value.is_finite() {
        return Err(RecordViolation::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(negative(value));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cost
// ---------------------------------------------------------------------------

/// Compute spent materializing a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub model_name: ModelName,

    /// Warehouse credits consumed by the last materialization
    pub cost_credits: f64,

    pub last_run: DateTime<Utc>,

    /// Materialization kind (table, view, incremental, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    /// Explicit reporting period; derived from `last_run` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_key: Option<PeriodKey>,
}

impl CostRecord {
    pub fn new(model_name: ModelName, cost_credits: f64, last_run: DateTime<Utc>) -> Self {
        Self {
            model_name,
            cost_credits,
            last_run,
            model_type: None,
            period_key: None,
        }
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    pub fn with_period_key(mut self, period_key: PeriodKey) -> Self {
        self.period_key = Some(period_key);
        self
    }

    /// The period this record is billed to.
    ///
    /// An explicit `period_key` wins; otherwise the UTC year-month of `last_run`.
    pub fn period(&self) -> PeriodKey {
        self.period_key
            .clone()
            .unwrap_or_else(|| PeriodKey::from_timestamp(&self.last_run))
    }

    pub fn validate(&self) -> Result<(), RecordViolation> {
        check_non_negative("cost_credits", self.cost_credits, RecordViolation::NegativeCost)
    }
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

/// Statement class of a logged query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
}

impl QueryType {
    /// All query types in reporting order
    pub const ALL: [QueryType; 4] = [
        QueryType::Select,
        QueryType::Insert,
        QueryType::Update,
        QueryType::Delete,
    ];
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Select => write!(f, "SELECT"),
            QueryType::Insert => write!(f, "INSERT"),
            QueryType::Update => write!(f, "UPDATE"),
            QueryType::Delete => write!(f, "DELETE"),
        }
    }
}

impl std::str::FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELECT" => Ok(QueryType::Select),
            "INSERT" => Ok(QueryType::Insert),
            "UPDATE" => Ok(QueryType::Update),
            "DELETE" => Ok(QueryType::Delete),
            other => Err(format!("unknown query type '{}'", other)),
        }
    }
}

/// One query issued against a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub timestamp: DateTime<Utc>,
    pub user: UserName,
    pub model_name: ModelName,
    pub query_type: QueryType,
}

// ---------------------------------------------------------------------------
// Governance
// ---------------------------------------------------------------------------

/// Documentation and ownership status of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    pub model_name: ModelName,
    pub has_documentation: bool,
    pub owner: OwnerName,
}

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

/// Query performance indicators for a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub model_name: ModelName,
    pub poor_partition_pruning: bool,

    /// Queries that spilled to disk in the observation window
    pub disk_spill_count: u32,

    pub avg_query_duration_seconds: f64,
}

impl PerformanceRecord {
    pub fn validate(&self) -> Result<(), RecordViolation> {
        check_non_negative(
            "avg_query_duration_seconds",
            self.avg_query_duration_seconds,
            RecordViolation::NegativeDuration,
        )
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Last refresh of a model and where its data comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRecord {
    pub model_name: ModelName,
    pub last_refreshed: DateTime<Utc>,
    pub source_system: SourceSystem,
}

impl QualityRecord {
    /// Validate against the evaluation instant; a refresh after `now` is rejected.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), RecordViolation> {
        if self.last_refreshed > now {
            return Err(RecordViolation::RefreshedInFuture {
                last_refreshed: self.last_refreshed,
                now,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
