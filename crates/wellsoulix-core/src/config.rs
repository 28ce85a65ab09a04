use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreError;

/// Get the local data directory for wellsoulix.
///
/// # Errors
///
/// Returns an error if the local data directory cannot be determined.
pub fn get_data_dir() -> Result<PathBuf> {
    let mut path =
        dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Failed to get local data dir"))?;
    path.push("wellsoulix");
    Ok(path)
}

/// Timing and widget defaults, read from `config.toml` in the data dir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Playback simulator tick period
    pub player_tick_ms: u64,
    /// Focus timer tick period (one tick = one second of countdown)
    pub focus_tick_ms: u64,
    /// Pause between a check-in and its generated reply
    pub checkin_reply_delay_ms: u64,
    pub default_focus_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_tick_ms: 1000,
            focus_tick_ms: 1000,
            checkin_reply_delay_ms: 1000,
            default_focus_minutes: 25,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file; a missing file yields defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the timers cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a zero tick period or focus length
    pub fn validate(&self) -> crate::error::Result<()> {
        for (key, value) in [
            ("player_tick_ms", self.player_tick_ms),
            ("focus_tick_ms", self.focus_tick_ms),
            ("default_focus_minutes", u64::from(self.default_focus_minutes)),
        ] {
            if value == 0 {
                return Err(CoreError::Config(format!("{key} must be greater than zero")));
            }
        }
        Ok(())
    }

    /// Load `config.toml` from the data dir
    ///
    /// # Errors
    ///
    /// Returns an error if the data dir is unknown or the file is malformed
    pub fn load_default() -> Result<Self> {
        let path = get_data_dir()?.join("config.toml");
        Ok(Self::load(&path)?)
    }

    #[must_use]
    pub const fn player_tick(&self) -> Duration {
        Duration::from_millis(self.player_tick_ms)
    }

    #[must_use]
    pub const fn focus_tick(&self) -> Duration {
        Duration::from_millis(self.focus_tick_ms)
    }

    #[must_use]
    pub const fn checkin_reply_delay(&self) -> Duration {
        Duration::from_millis(self.checkin_reply_delay_ms)
    }
}
