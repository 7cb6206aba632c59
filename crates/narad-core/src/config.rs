//! Application configuration management.
//!
//! The configuration records where the staff file lives, the last Staff ID
//! used to log in, and a few tunables for the dashboard.
//!
//! Configuration is stored at `~/.config/narad-console/config.json`.
//! `NARAD_STAFF_FILE` and `NARAD_SIGN_IN_DELAY_MS` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::alerts::DEFAULT_ALERT_CAPACITY;
use crate::session::DEFAULT_SIGN_IN_DELAY;

/// Application name used for config/data/cache directory paths
const APP_NAME: &str = "narad-console";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default staff file name inside the data directory
const STAFF_FILE: &str = "users.json";

const ENV_STAFF_FILE: &str = "NARAD_STAFF_FILE";
const ENV_SIGN_IN_DELAY_MS: &str = "NARAD_SIGN_IN_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub staff_file: Option<PathBuf>,
    pub last_staff_id: Option<String>,
    pub sign_in_delay_ms: u64,
    pub alert_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staff_file: None,
            last_staff_id: None,
            sign_in_delay_ms: DEFAULT_SIGN_IN_DELAY.as_millis() as u64,
            alert_capacity: DEFAULT_ALERT_CAPACITY,
        }
    }
}

impl Config {
    /// Load the config at `path` and apply overrides from `lookup`.
    ///
    /// An unreadable or malformed file falls back to defaults. Overrides are
    /// applied in both cases and the load error is handed back for reporting.
    pub fn load_or_default<F>(path: &Path, lookup: F) -> (Self, Option<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, error) = match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.apply_overrides(lookup);
        (config, error)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from `lookup` (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_STAFF_FILE).filter(|p| !p.is_empty()) {
            self.staff_file = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_SIGN_IN_DELAY_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.sign_in_delay_ms = ms,
                Err(e) => warn!(error = %e, value = %raw, "Ignoring invalid {}", ENV_SIGN_IN_DELAY_MS),
            }
        }
    }

    pub fn sign_in_delay(&self) -> Duration {
        Duration::from_millis(self.sign_in_delay_ms)
    }

    /// Staff file location: the configured path, or the default in the
    /// user data directory.
    pub fn staff_file_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.staff_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(STAFF_FILE))
    }

    /// Directory for the application log file.
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// `~/.config/narad-console/config.json` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
