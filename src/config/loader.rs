//! Reference-table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading yearly
//! reference tables from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ReferenceTable, ReferenceTableConfig, TableSet};

/// Loads and provides access to yearly reference tables.
///
/// The `ConfigLoader` reads every `*.yaml` file in a directory, one
/// file per calendar year, validates each table (constants and bracket
/// schedules) and exposes lookups by year.
///
/// # Directory Structure
///
/// ```text
/// config/tables/
/// ├── 2024.yaml
/// └── 2025.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use tributo_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tables").unwrap();
/// let table = loader.for_year(2025).unwrap();
/// println!("minimum wage: {}", table.minimum_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: TableSet,
}

impl ConfigLoader {
    /// Loads all reference tables from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the tables directory (e.g., "./config/tables")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory does not exist or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Any table fails validation (negative constants, malformed
    ///   bracket schedules)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                tables.push(Self::load_table(&path)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        Ok(Self {
            tables: TableSet::new(tables),
        })
    }

    /// Loads and validates a single yearly table file.
    fn load_table(path: &Path) -> EngineResult<ReferenceTable> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: ReferenceTableConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        ReferenceTable::from_config(config)
    }

    /// Returns the loaded table set.
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Returns the table for the given year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TableNotFound`] when no table was loaded
    /// for the year.
    pub fn for_year(&self, year: i32) -> EngineResult<&ReferenceTable> {
        self.tables.for_year(year)
    }

    /// Returns the most recent loaded table.
    pub fn latest(&self) -> Option<&ReferenceTable> {
        self.tables.latest()
    }
}
