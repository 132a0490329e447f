//! Configuration types and parsing for snowgauge.yml

use crate::error::{CoreError, CoreResult};
use crate::names::SchemaName;
use crate::records::RecordKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched for in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["snowgauge.yml", "snowgauge.yaml"];

/// Main project configuration from snowgauge.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Schemas that can be selected for reporting
    #[serde(default)]
    pub schemas: Vec<SchemaName>,

    /// Schema reported on when none is passed on the command line
    #[serde(default)]
    pub default_schema: Option<SchemaName>,

    /// Warehouse connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Warehouse table holding each dataset
    #[serde(default)]
    pub tables: TableNames,

    /// Output directory for written reports
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Directory holding CSV seed data, one sub-directory per schema
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Table names for the five monitoring datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TableNames {
    pub cost: String,
    pub usage: String,
    pub governance: String,
    pub performance: String,
    pub quality: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            cost: "materialization_costs".to_string(),
            usage: "query_history".to_string(),
            governance: "model_governance".to_string(),
            performance: "model_performance".to_string(),
            quality: "model_freshness".to_string(),
        }
    }
}

impl TableNames {
    /// Table holding records of the given kind
    pub fn table_for(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Cost => &self.cost,
            RecordKind::Usage => &self.usage,
            RecordKind::Governance => &self.governance,
            RecordKind::Performance => &self.performance,
            RecordKind::Quality => &self.quality,
        }
    }
}

/// Database path meaning "in-memory DuckDB"
pub const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_seed_path() -> String {
    "seeds".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for snowgauge.yml or snowgauge.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
        {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if let Some(default) = &self.default_schema {
            if !self.is_known_schema(default) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "default_schema '{}' is not listed in schemas ({})",
                        default,
                        self.known_schemas()
                    ),
                });
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            let table = self.tables.table_for(kind);
            if table.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("tables.{} cannot be empty", kind),
                });
            }
            if seen.contains(&table) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("table '{}' is used by more than one dataset", table),
                });
            }
            seen.push(table);
        }

        Ok(())
    }

    /// An empty `schemas` list accepts any schema name.
    fn is_known_schema(&self, name: &SchemaName) -> bool {
        self.schemas.is_empty() || self.schemas.contains(name)
    }

    fn known_schemas(&self) -> String {
        self.schemas
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Pick the schema to report on.
    ///
    /// Precedence: explicit selection, then `default_schema`, then the first
    /// entry of `schemas`.
    pub fn resolve_schema(&self, selected: Option<&str>) -> CoreResult<SchemaName> {
        if let Some(raw) = selected {
            let name = SchemaName::try_new(raw.trim()).ok_or(CoreError::NoSchemaSelected)?;
            if !self.is_known_schema(&name) {
                return Err(CoreError::UnknownSchema {
                    name: name.into_inner(),
                    known: self.known_schemas(),
                });
            }
            return Ok(name);
        }

        self.default_schema
            .clone()
            .or_else(|| self.schemas.first().cloned())
            .ok_or(CoreError::NoSchemaSelected)
    }

    /// Get absolute target path relative to a project root
    pub fn target_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.target_path)
    }

    /// Get absolute seed path relative to a project root
    pub fn seed_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.seed_path)
    }

    /// True when the warehouse lives only for the current process
    pub fn is_in_memory(&self) -> bool {
        self.database.path == DEFAULT_DB_PATH
    }

    /// Database path, resolved against the project root unless in-memory or absolute
    pub fn database_path(&self, root: &Path) -> String {
        if self.database.path == DEFAULT_DB_PATH || Path::new(&self.database.path).is_absolute() {
            self.database.path.clone()
        } else {
            root.join(&self.database.path).display().to_string()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
