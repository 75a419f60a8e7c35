//! Runtime configuration.
//!
//! Settings load from a TOML file (`CADASTRO_CONFIG`, falling back to
//! `cadastro.toml` in the working directory) and individual values can be
//! overridden by environment variables. Nothing sensitive lives in source.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "CADASTRO_CONFIG";
pub const DB_PATH_ENV: &str = "CADASTRO_DB";
pub const DEFAULT_CONFIG_FILE: &str = "cadastro.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
}

fn default_db_path() -> String {
    "cadastro.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[allow(clippy::derivable_impls)]
impl Default for LoggingConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing config file {path}"))?;
        Ok(config)
    }

    /// Resolve the effective configuration: explicit file, default file if
    /// present, built-in defaults otherwise. `CADASTRO_DB` wins over the file.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Config::default(),
        };
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            config.database.path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.path, "cadastro.db");
        assert!(!config.logging.verbose);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\npath = \"frota.db\"\n\n[logging]\nverbose = true"
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database.path, "frota.db");
        assert!(config.logging.verbose);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nverbose = true").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database.path, "cadastro.db");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = 3").unwrap();
        assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
    }
}
