//! sg-core - Core library for Snowgauge
//!
//! This crate provides the typed warehouse records the metrics engine
//! consumes, the strongly-typed names they carry, timestamp and period
//! helpers, and project configuration parsing.

pub mod config;
pub mod error;
pub mod names;
mod newtype_string;
pub mod period;
pub mod records;
pub mod timestamp;

pub use config::{Config, DatabaseConfig, TableNames};
pub use error::{CoreError, CoreResult};
pub use names::{ModelName, OwnerName, SchemaName, SourceSystem, UserName};
pub use newtype_string::EmptyNameError;
pub use period::{InvalidPeriodKey, PeriodKey};
pub use records::{
    CostRecord, GovernanceRecord, PerformanceRecord, QualityRecord, QueryType, RecordKind,
    RecordViolation, UsageRecord,
};
pub use timestamp::parse_timestamp;
