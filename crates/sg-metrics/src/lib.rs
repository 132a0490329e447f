//! sg-metrics - Metrics engine for Snowgauge
//!
//! Turns typed warehouse records into derived metrics and recommendation
//! text. Every entry point is a pure function: inputs are borrowed and never
//! modified, the evaluation instant is passed in explicitly, and repeated calls
//! with the same arguments produce the same output.
//!
//! - [`analyze_cost`], [`analyze_usage`], [`analyze_governance`],
//!   [`analyze_performance`], [`analyze_quality`] compute one domain each and
//!   return an [`Outcome`], which is `NoData` for an empty dataset.
//! - [`summarize`] runs all five and produces a [`SummaryReport`].
//! - Records that break their field constraints fail with
//!   [`MetricsError::InvalidRecord`]; ties are resolved by input order.

pub mod cost;
pub mod error;
pub mod governance;
pub mod insight;
pub mod outcome;
pub mod performance;
pub mod quality;
pub mod summary;
pub mod usage;

pub use cost::{analyze_cost, available_periods, CostMetrics, CostReport, ModelTypeCost};
pub use error::{MetricsError, MetricsResult};
pub use governance::{
    analyze_governance, documentation_ratio, GovernanceMetrics, OwnerSummary,
    DOCUMENTATION_TARGET,
};
pub use insight::{InsightCategory, Severity, SummaryInsight};
pub use outcome::{NoDataReason, Outcome};
pub use performance::{analyze_performance, PerformanceMetrics};
pub use quality::{
    analyze_quality, hours_since_refresh, FreshnessRow, QualityMetrics, StalenessTier,
};
pub use summary::{summarize, SummaryInputs, SummaryReport};
pub use usage::{
    analyze_usage, daily_volume, rank_models, DailyVolume, QueryTypeCount, TopModelRanking,
    UsageMetrics, TOP_MODELS_LIMIT,
};
