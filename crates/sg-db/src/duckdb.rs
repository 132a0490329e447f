//! DuckDB warehouse backend

use crate::error::{DbError, DbResult};
use crate::traits::{Database, MetricsSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{Connection, Row};
use sg_core::{
    parse_timestamp, CostRecord, EmptyNameError, GovernanceRecord, PerformanceRecord,
    PeriodKey, QualityRecord, QueryType, RecordKind, SchemaName, TableNames, UsageRecord,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB-backed warehouse
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    tables: TableNames,
}

/// Quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a `schema.table` pair
pub fn quote_qualified(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::with_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::with_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            tables: TableNames::default(),
        }
    }

    /// Read datasets from the given table names instead of the defaults
    pub fn with_tables(mut self, tables: TableNames) -> Self {
        self.tables = tables;
        self
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn split_qualified(name: &str) -> (&str, &str) {
        match name.rfind('.') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("main", name),
        }
    }

    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = Self::split_qualified(name);
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = {} AND table_name = {}",
            quote_literal(schema),
            quote_literal(table)
        );
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }

    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let count_sql = format!("SELECT COUNT(*) FROM ({}) AS subq", sql);
        let conn = self.lock()?;
        let count: i64 = conn.query_row(&count_sql, [], |row| row.get(0))?;
        usize::try_from(count).map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Lower-cased column names of `schema.table`
    fn column_names(&self, schema: &str, table: &str) -> DbResult<HashSet<String>> {
        let sql = format!(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = {} AND table_name = {}",
            quote_literal(schema),
            quote_literal(table)
        );
        let names: Vec<String> = self.query_rows(&sql, |row| row.get(0))?;
        if names.is_empty() {
            return Err(DbError::TableNotFound(format!("{}.{}", schema, table)));
        }
        Ok(names.into_iter().map(|n| n.to_lowercase()).collect())
    }

    fn query_rows<T>(
        &self,
        sql: &str,
        decode: impl FnMut(&Row<'_>) -> duckdb::Result<T>,
    ) -> DbResult<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], decode)?;
        let collected = rows.collect::<Result<Vec<T>, _>>()?;
        Ok(collected)
    }

    /// Build the SELECT for a dataset.
    ///
    /// `optional` columns missing from the table are read as NULL.
    fn select_sql(
        &self,
        schema: &SchemaName,
        kind: RecordKind,
        required: &[&str],
        optional: &[&str],
    ) -> DbResult<(String, String)> {
        let table = self.tables.table_for(kind);
        let present = self.column_names(schema, table)?;

        let mut columns: Vec<String> = Vec::with_capacity(required.len() + optional.len());
        for expr in required {
            columns.push(expr.to_string());
        }
        for col in optional {
            if present.contains(*col) {
                columns.push(format!("CAST({} AS VARCHAR)", quote_ident(col)));
            } else {
                log::debug!("{}.{} has no column '{}', reading NULL", schema, table, col);
                columns.push("CAST(NULL AS VARCHAR)".to_string());
            }
        }

        let qualified = quote_qualified(schema, table);
        let sql = format!("SELECT {} FROM {}", columns.join(", "), qualified);
        Ok((sql, format!("{}.{}", schema, table)))
    }
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

fn decode_err(table: &str, row: usize, message: impl Into<String>) -> DbError {
    DbError::RowDecode {
        table: table.to_string(),
        row,
        message: message.into(),
    }
}

fn name<T>(table: &str, row: usize, value: String) -> DbResult<T>
where
    T: TryFrom<String, Error = EmptyNameError>,
{
    T::try_from(value).map_err(|e| decode_err(table, row, e.to_string()))
}

fn timestamp(table: &str, row: usize, field: &str, value: &str) -> DbResult<DateTime<Utc>> {
    parse_timestamp(value)
        .ok_or_else(|| decode_err(table, row, format!("unparseable {} '{}'", field, value)))
}

type CostRow = (String, f64, String, Option<String>, Option<String>);
type UsageRow = (String, String, String, String);
type GovernanceRow = (String, bool, String);
type PerformanceRow = (String, bool, i64, f64);
type QualityRow = (String, String, String);

fn cost_from_row(table: &str, idx: usize, row: CostRow) -> DbResult<CostRecord> {
    let (model, cost, last_run, model_type, period_key) = row;
    let mut record = CostRecord::new(
        name(table, idx, model)?,
        cost,
        timestamp(table, idx, "last_run", &last_run)?,
    );
    record.model_type = model_type.filter(|t| !t.is_empty());
    if let Some(raw) = period_key.filter(|p| !p.is_empty()) {
        let period = PeriodKey::parse(&raw).map_err(|e| decode_err(table, idx, e.to_string()))?;
        record.period_key = Some(period);
    }
    Ok(record)
}

fn usage_from_row(table: &str, idx: usize, row: UsageRow) -> DbResult<UsageRecord> {
    let (ts, user, model, query_type) = row;
    Ok(UsageRecord {
        timestamp: timestamp(table, idx, "timestamp", &ts)?,
        user: name(table, idx, user)?,
        model_name: name(table, idx, model)?,
        query_type: query_type
            .parse::<QueryType>()
            .map_err(|e| decode_err(table, idx, e))?,
    })
}

fn governance_from_row(table: &str, idx: usize, row: GovernanceRow) -> DbResult<GovernanceRecord> {
    let (model, has_documentation, owner) = row;
    Ok(GovernanceRecord {
        model_name: name(table, idx, model)?,
        has_documentation,
        owner: name(table, idx, owner)?,
    })
}

fn performance_from_row(
    table: &str,
    idx: usize,
    row: PerformanceRow,
) -> DbResult<PerformanceRecord> {
    let (model, pruning, spills, duration) = row;
    let disk_spill_count = u32::try_from(spills).map_err(|_| {
        decode_err(
            table,
            idx,
            format!("disk_spill_count must be a non-negative integer, got {}", spills),
        )
    })?;
    Ok(PerformanceRecord {
        model_name: name(table, idx, model)?,
        poor_partition_pruning: pruning,
        disk_spill_count,
        avg_query_duration_seconds: duration,
    })
}

fn quality_from_row(table: &str, idx: usize, row: QualityRow) -> DbResult<QualityRecord> {
    let (model, refreshed, source) = row;
    Ok(QualityRecord {
        model_name: name(table, idx, model)?,
        last_refreshed: timestamp(table, idx, "last_refreshed", &refreshed)?,
        source_system: name(table, idx, source)?,
    })
}

fn decode_all<R, T>(
    table: &str,
    rows: Vec<R>,
    convert: impl Fn(&str, usize, R) -> DbResult<T>,
) -> DbResult<Vec<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| convert(table, idx, row))
        .collect()
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn load_csv(&self, table: &str, path: &str) -> DbResult<()> {
        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_csv_auto({})",
            table,
            quote_literal(path)
        );
        self.execute_batch_sync(&sql)
            .map_err(|e| DbError::CsvError(format!("{}: {}", path, e)))
    }

    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()> {
        let sql = format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema));
        self.execute_batch_sync(&sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[async_trait]
impl MetricsSource for DuckDbBackend {
    async fn cost_records(&self, schema: &SchemaName) -> DbResult<Vec<CostRecord>> {
        let (sql, table) = self.select_sql(
            schema,
            RecordKind::Cost,
            &[
                "CAST(model_name AS VARCHAR)",
                "CAST(cost_credits AS DOUBLE)",
                "CAST(last_run AS VARCHAR)",
            ],
            &["model_type", "period_key"],
        )?;
        let rows: Vec<CostRow> = self.query_rows(&sql, |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?;
        log::debug!("Read {} cost row(s) from {}", rows.len(), table);
        decode_all(&table, rows, cost_from_row)
    }

    async fn usage_records(&self, schema: &SchemaName) -> DbResult<Vec<UsageRecord>> {
        let (sql, table) = self.select_sql(
            schema,
            RecordKind::Usage,
            &[
                "CAST(\"timestamp\" AS VARCHAR)",
                "CAST(\"user\" AS VARCHAR)",
                "CAST(model_name AS VARCHAR)",
                "CAST(query_type AS VARCHAR)",
            ],
            &[],
        )?;
        let rows: Vec<UsageRow> =
            self.query_rows(&sql, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))?;
        log::debug!("Read {} usage row(s) from {}", rows.len(), table);
        decode_all(&table, rows, usage_from_row)
    }

    async fn governance_records(&self, schema: &SchemaName) -> DbResult<Vec<GovernanceRecord>> {
        let (sql, table) = self.select_sql(
            schema,
            RecordKind::Governance,
            &[
                "CAST(model_name AS VARCHAR)",
                "CAST(has_documentation AS BOOLEAN)",
                "CAST(owner AS VARCHAR)",
            ],
            &[],
        )?;
        let rows: Vec<GovernanceRow> =
            self.query_rows(&sql, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
        log::debug!("Read {} governance row(s) from {}", rows.len(), table);
        decode_all(&table, rows, governance_from_row)
    }

    async fn performance_records(
        &self,
        schema: &SchemaName,
    ) -> DbResult<Vec<PerformanceRecord>> {
        let (sql, table) = self.select_sql(
            schema,
            RecordKind::Performance,
            &[
                "CAST(model_name AS VARCHAR)",
                "CAST(poor_partition_pruning AS BOOLEAN)",
                "CAST(disk_spill_count AS BIGINT)",
                "CAST(avg_query_duration_seconds AS DOUBLE)",
            ],
            &[],
        )?;
        let rows: Vec<PerformanceRow> = self.query_rows(&sql, |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;
        log::debug!("Read {} performance row(s) from {}", rows.len(), table);
        decode_all(&table, rows, performance_from_row)
    }

    async fn quality_records(&self, schema: &SchemaName) -> DbResult<Vec<QualityRecord>> {
        let (sql, table) = self.select_sql(
            schema,
            RecordKind::Quality,
            &[
                "CAST(model_name AS VARCHAR)",
                "CAST(last_refreshed AS VARCHAR)",
                "CAST(source_system AS VARCHAR)",
            ],
            &[],
        )?;
        let rows: Vec<QualityRow> =
            self.query_rows(&sql, |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
        log::debug!("Read {} quality row(s) from {}", rows.len(), table);
        decode_all(&table, rows, quality_from_row)
    }

    async fn list_schemas(&self) -> DbResult<Vec<SchemaName>> {
        let names: Vec<String> = RecordKind::ALL
            .iter()
            .map(|kind| quote_literal(self.tables.table_for(*kind)))
            .collect();
        let sql = format!(
            "SELECT DISTINCT table_schema FROM information_schema.tables \
             WHERE table_name IN ({}) ORDER BY table_schema",
            names.join(", ")
        );
        let schemas: Vec<String> = self.query_rows(&sql, |row| row.get(0))?;
        Ok(schemas.into_iter().filter_map(SchemaName::try_new).collect())
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
