//! Runtime configuration loaded from TOML.
//!
//! The file is selected via:
//! 1. `--config <path>` on the command line
//! 2. `<config dir>/ticket-desk/config.toml` when it exists
//! 3. Built-in defaults
//!
//! Every key is optional; anything left out falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

/// SQLite file name stored inside the data directory.
const DEFAULT_DATABASE_FILE: &str = "book_ticket.db";
/// Log file written inside the data directory.
pub const LOG_FILE_NAME: &str = "ticket-desk.log";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Holds the database and the log file.
    pub data_dir: PathBuf,
    /// Where ticket PDFs and CSV exports are written.
    pub output_dir: PathBuf,
    pub database_file: String,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: PathBuf::from("."),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse a config file. A missing file is an error here; use
    /// [`Config::load`] for the fallback chain.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.database_file.trim().is_empty() {
            return Err(anyhow!("database_file must not be empty"));
        }
        Ok(config)
    }

    /// Resolve the configuration using the explicit path if given, then the
    /// per-user config file, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ticket-desk")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Per-user data directory, or `./data` when the platform offers none.
fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database_file, "book_ticket.db");
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = Config::from_toml(
            r#"
output_dir = "/tmp/tickets"
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/tickets"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database_file, "book_ticket.db");
    }

    #[test]
    fn derived_paths_live_in_data_dir() {
        let config = Config::from_toml("data_dir = \"/srv/desk\"").unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/srv/desk/book_ticket.db"));
        assert_eq!(config.log_path(), PathBuf::from("/srv/desk/ticket-desk.log"));
    }

    #[test]
    fn rejects_blank_database_file() {
        assert!(Config::from_toml("database_file = \"  \"").is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Config::from_toml("output_dir = [").is_err());
    }
}
