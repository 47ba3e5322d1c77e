use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub ledger_path: String,
    pub column_map_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let ledger_path = env_map
            .get("LEDGER_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("LEDGER_PATH".to_string()))?;

        let column_map_path = env_map
            .get("COLUMN_MAP_PATH")
            .cloned()
            .unwrap_or_else(|| "columns.json".to_string());

        Ok(Config {
            port,
            database_path,
            ledger_path,
            column_map_path,
        })
    }
}

/// Maps the logical ledger fields to source column positions.
///
/// The defaults match the broker export this tool was written against;
/// other exports override them through a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub id: usize,
    pub isin: usize,
    pub side: usize,
    pub ticker: usize,
    pub date: usize,
    pub shares: usize,
    pub amount: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            id: 2,
            isin: 3,
            side: 1,
            ticker: 4,
            date: 6,
            shares: 8,
            amount: 22,
        }
    }
}

impl ColumnMap {
    /// Load the column map from `path`.
    ///
    /// A missing file falls back to the defaults and persists them to
    /// `path` so the next run has a file to edit. A file that exists but
    /// fails to parse falls back without overwriting it.
    pub fn load_or_init(path: &Path) -> ColumnMap {
        let defaults = ColumnMap::default();

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "column map file missing, writing defaults");
                defaults.persist(path);
                return defaults;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "column map file unreadable, using defaults");
                defaults
            }
        }
    }

    fn persist(&self, path: &Path) {
        let json = match serde_json::to_vec_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "cannot serialize default column map");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            error!(path = %path.display(), error = %e, "cannot persist default column map");
        }
    }
}
