//! Runtime context for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sg_core::{Config, SchemaName};
use sg_db::{Database, DuckDbBackend, MetricsSnapshot, MetricsSource};
use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, resolve_now};
use crate::commands::seed;

/// Loaded configuration, evaluation instant and warehouse connection
pub(crate) struct RuntimeContext {
    /// Project root that relative config paths resolve against
    pub root: PathBuf,

    pub config: Config,

    /// Instant every freshness figure is computed against
    pub now: DateTime<Utc>,

    selected_schema: Option<String>,
    backend: DuckDbBackend,
}

impl RuntimeContext {
    /// Load config and connect without touching the warehouse contents
    pub(crate) fn connect(global: &GlobalArgs) -> Result<Self> {
        let (root, config) = load_config(global)?;
        let now = resolve_now(global.now.as_deref())?;

        let db_path = config.database_path(&root);
        log::debug!("Opening warehouse at {}", db_path);
        let backend = DuckDbBackend::new(&db_path)
            .context("Failed to connect to database")?
            .with_tables(config.tables.clone());

        Ok(Self {
            root,
            config,
            now,
            selected_schema: global.schema.clone(),
            backend,
        })
    }

    /// Connect for reporting.
    ///
    /// An in-memory warehouse starts empty, so the seed files are loaded
    /// into it first.
    pub(crate) async fn new(global: &GlobalArgs) -> Result<Self> {
        let ctx = Self::connect(global)?;
        if ctx.config.is_in_memory() {
            let seeds = seed::discover_seeds(&ctx, None)?;
            log::debug!("In-memory warehouse: loading {} seed file(s)", seeds.len());
            for file in &seeds {
                seed::load_seed(ctx.database(), file).await?;
            }
        }
        Ok(ctx)
    }

    /// Schema to report on: `--schema`, else the configured default
    pub(crate) fn schema(&self) -> Result<SchemaName> {
        self.config
            .resolve_schema(self.selected_schema.as_deref())
            .context("Failed to resolve schema")
    }

    pub(crate) fn database(&self) -> &dyn Database {
        &self.backend
    }

    pub(crate) fn source(&self) -> &dyn MetricsSource {
        &self.backend
    }

    /// Read all five datasets for `schema`
    pub(crate) async fn snapshot(&self, schema: &SchemaName) -> Result<MetricsSnapshot> {
        MetricsSnapshot::fetch(self.source(), schema)
            .await
            .with_context(|| format!("Failed to read monitoring data for schema '{}'", schema))
    }

    pub(crate) fn target_dir(&self) -> PathBuf {
        self.config.target_path_absolute(&self.root)
    }
}
