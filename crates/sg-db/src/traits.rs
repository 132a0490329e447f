//! Warehouse access traits

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use sg_core::{
    CostRecord, GovernanceRecord, PerformanceRecord, QualityRecord, RecordKind, SchemaName,
    UsageRecord,
};

/// Low-level statement execution used for seeding and maintenance
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a (possibly schema-qualified) table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Count the rows returned by a query
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Replace `table` with the contents of a CSV file
    async fn load_csv(&self, table: &str, path: &str) -> DbResult<()>;

    /// Create a schema if it does not exist
    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Reads the monitoring datasets for a schema.
///
/// Records come back in the order the warehouse returns them; the metrics
/// engine breaks ties by that order.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn cost_records(&self, schema: &SchemaName) -> DbResult<Vec<CostRecord>>;

    async fn usage_records(&self, schema: &SchemaName) -> DbResult<Vec<UsageRecord>>;

    async fn governance_records(&self, schema: &SchemaName) -> DbResult<Vec<GovernanceRecord>>;

    async fn performance_records(&self, schema: &SchemaName)
        -> DbResult<Vec<PerformanceRecord>>;

    async fn quality_records(&self, schema: &SchemaName) -> DbResult<Vec<QualityRecord>>;

    /// Schemas containing at least one monitoring table, sorted by name
    async fn list_schemas(&self) -> DbResult<Vec<SchemaName>>;
}

/// All five datasets for one schema
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub cost: Vec<CostRecord>,
    pub usage: Vec<UsageRecord>,
    pub governance: Vec<GovernanceRecord>,
    pub performance: Vec<PerformanceRecord>,
    pub quality: Vec<QualityRecord>,

    /// Datasets whose table does not exist in the schema; read as empty
    pub missing: Vec<RecordKind>,
}

impl MetricsSnapshot {
    /// Fetch every dataset for `schema` from `source`.
    ///
    /// A missing table leaves its dataset empty and is listed in
    /// [`missing`](Self::missing); any other error aborts the fetch.
    pub async fn fetch(source: &dyn MetricsSource, schema: &SchemaName) -> DbResult<Self> {
        let mut missing = Vec::new();
        let cost = or_missing(
            RecordKind::Cost,
            schema,
            source.cost_records(schema).await,
            &mut missing,
        )?;
        let usage = or_missing(
            RecordKind::Usage,
            schema,
            source.usage_records(schema).await,
            &mut missing,
        )?;
        let governance = or_missing(
            RecordKind::Governance,
            schema,
            source.governance_records(schema).await,
            &mut missing,
        )?;
        let performance = or_missing(
            RecordKind::Performance,
            schema,
            source.performance_records(schema).await,
            &mut missing,
        )?;
        let quality = or_missing(
            RecordKind::Quality,
            schema,
            source.quality_records(schema).await,
            &mut missing,
        )?;

        Ok(Self {
            cost,
            usage,
            governance,
            performance,
            quality,
            missing,
        })
    }
}

fn or_missing<T>(
    kind: RecordKind,
    schema: &SchemaName,
    result: DbResult<Vec<T>>,
    missing: &mut Vec<RecordKind>,
) -> DbResult<Vec<T>> {
    match result {
        Err(DbError::TableNotFound(table)) => {
            log::warn!(
                "No {} table in schema {} ({}), reporting it as empty",
                kind,
                schema,
                table
            );
            missing.push(kind);
            Ok(Vec::new())
        }
        other => other,
    }
}
