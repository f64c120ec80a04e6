//! Tome configuration.
//!
//! Loaded from `~/.tome/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::{Timestamp, Zoned, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

/// Tome configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// IANA time zone used to decide what "today" is.
    /// The system zone when unset.
    pub time_zone: Option<String>,

    /// Deadlines this many days out or fewer are urgent.
    pub urgent_days: u32,

    /// How many recent days feed the reader's own pace.
    pub pace_window_days: u32,

    /// Share of the required pace that still counts as tight rather than behind.
    pub tight_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: None,
            urgent_days: 7,
            pace_window_days: 14,
            tight_ratio: 0.8,
        }
    }
}

impl Config {
    /// Load config from `~/.tome/config.toml`, falling back to defaults.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config
            .validate()
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        Ok(config)
    }

    /// The config file path: `~/.tome/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tome").join("config.toml"))
    }

    /// Today's date in the configured time zone.
    pub fn today(&self) -> Result<Date, String> {
        let now = match &self.time_zone {
            Some(name) => Timestamp::now()
                .in_tz(name)
                .map_err(|e| format!("unknown time zone '{name}': {e}"))?,
            None => Zoned::now(),
        };
        Ok(now.date())
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.tight_ratio > 0.0 && self.tight_ratio <= 1.0) {
            return Err(format!(
                "tight-ratio must be in (0, 1], got {}",
                self.tight_ratio
            ));
        }
        if self.pace_window_days == 0 {
            return Err("pace-window-days must be at least 1".to_string());
        }
        if let Some(name) = &self.time_zone {
            TimeZone::get(name).map_err(|e| format!("unknown time zone '{name}': {e}"))?;
        }
        Ok(())
    }
}
