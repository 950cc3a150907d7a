//! Path resolution for lapse configuration and data files.
//!
//! All lapse data is stored in `~/.lapse/` (or `$LAPSE_HOME`):
//! - `config.yaml` - Main configuration file
//! - `lapse.db` - SQLite database holding the key-value store
//! - `logs/lapse.log` - Log output

use std::path::PathBuf;

use crate::error::LapseError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "LAPSE_HOME";

/// Paths to lapse configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.lapse/`
    pub root: PathBuf,
    /// Config file: `~/.lapse/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.lapse/lapse.db`
    pub database: PathBuf,
    /// Logs directory: `~/.lapse/logs/`
    pub logs: PathBuf,
    /// Log file: `~/.lapse/logs/lapse.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$LAPSE_HOME`, falling back to `~/.lapse`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `$LAPSE_HOME` nor the home directory is set.
    pub fn new() -> Result<Self, LapseError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME")
            .map_err(|_| LapseError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".lapse")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        let logs = root.join("logs");
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("lapse.db"),
            log_file: logs.join("lapse.log"),
            logs,
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), LapseError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    LapseError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}
