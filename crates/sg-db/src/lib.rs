//! sg-db - Warehouse access layer for Snowgauge
//!
//! This crate provides the `MetricsSource` trait the CLI reads records
//! through, a `Database` trait for seeding, and a DuckDB implementation of
//! both.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, MetricsSnapshot, MetricsSource};
