//! Configuration loading and representation.
//!
//! Settings come from the environment, with command-line overrides layered on
//! top by the binary. The coefficient table is optional configuration: without
//! a table file the built-in table is used.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use ewaste_ledger::CoefficientTable;

use crate::store::CsvFileLedgerStore;

/// Environment variable naming the ledger CSV file.
pub const DATA_FILE_ENV: &str = "EWASTE_DATA_FILE";

/// Environment variable naming a JSON coefficient table file.
pub const COEFFICIENTS_ENV: &str = "EWASTE_COEFFICIENTS";

/// Ledger file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "ewaste_data.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read coefficient table {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid coefficient table {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Coefficient table file layout:
/// `{"items": [{"item": "Laptop", "kg_co2_per_unit": 12.5}, ...]}`.
#[derive(Debug, Deserialize)]
struct CoefficientFile {
    items: CoefficientTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub coefficients_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            coefficients_file: None,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup` (an environment stand-in).
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_file = match get(DATA_FILE_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                tracing::debug!("{DATA_FILE_ENV} not set; using {DEFAULT_DATA_FILE}");
                PathBuf::from(DEFAULT_DATA_FILE)
            }
        };

        Self {
            data_file,
            coefficients_file: get(COEFFICIENTS_ENV).map(PathBuf::from),
        }
    }

    /// Apply explicit overrides (e.g. command-line flags).
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        coefficients_file: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        if coefficients_file.is_some() {
            self.coefficients_file = coefficients_file;
        }
        self
    }

    /// The configured coefficient table, or the built-in one.
    pub fn coefficient_table(&self) -> Result<CoefficientTable, ConfigError> {
        match &self.coefficients_file {
            Some(path) => load_coefficient_table(path),
            None => Ok(CoefficientTable::standard()),
        }
    }

    pub fn store(&self) -> CsvFileLedgerStore {
        CsvFileLedgerStore::new(&self.data_file)
    }
}

/// Load and validate a JSON coefficient table file.
pub fn load_coefficient_table(path: &Path) -> Result<CoefficientTable, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CoefficientFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), items = file.items.len(), "loaded coefficient table");
    Ok(file.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file, PathBuf::from("ewaste_data.csv"));
        assert_eq!(config.coefficient_table().unwrap(), CoefficientTable::standard());
    }

    #[test]
    fn reads_paths_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_FILE_ENV, "/var/lib/ewaste/ledger.csv"),
            (COEFFICIENTS_ENV, "/etc/ewaste/coefficients.json"),
        ]));
        assert_eq!(config.data_file, PathBuf::from("/var/lib/ewaste/ledger.csv"));
        assert_eq!(
            config.coefficients_file,
            Some(PathBuf::from("/etc/ewaste/coefficients.json"))
        );
        assert_eq!(config.store().path(), Path::new("/var/lib/ewaste/ledger.csv"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(DATA_FILE_ENV, "  "), (COEFFICIENTS_ENV, "")]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = AppConfig::from_lookup(lookup(&[(DATA_FILE_ENV, "env.csv")]))
            .with_overrides(Some(PathBuf::from("flag.csv")), None);
        assert_eq!(config.data_file, PathBuf::from("flag.csv"));
        assert_eq!(config.coefficients_file, None);
    }

    #[test]
    fn loads_coefficient_table_file_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coefficients.json");
        std::fs::write(
            &path,
            r#"{"items":[{"item":"Tablet","kg_co2_per_unit":8.0},{"item":"Mouse","kg_co2_per_unit":0.4}]}"#,
        )
        .unwrap();

        let config = AppConfig::default().with_overrides(None, Some(path));
        let table = config.coefficient_table().unwrap();

        assert_eq!(table.items().collect::<Vec<_>>(), vec!["Tablet", "Mouse"]);
        assert_eq!(table.get("Mouse"), Some(0.4));
    }

    #[test]
    fn invalid_coefficient_table_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coefficients.json");
        std::fs::write(&path, r#"{"items":[{"item":"Tablet","kg_co2_per_unit":0}]}"#).unwrap();

        let err = load_coefficient_table(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn missing_coefficient_table_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_coefficient_table(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
