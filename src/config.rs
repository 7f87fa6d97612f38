use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::WatchError;
use crate::implicit::DEFAULT_SILENCE_THRESHOLD_SECONDS;
use crate::schedule::DEFAULT_SCHEDULE_HORIZON_HOURS;

/// Tunable heuristic constants. Both defaults are untuned; override them from
/// a JSON file rather than editing the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatchConfig {
    pub silence_threshold_seconds: i64,
    pub schedule_horizon_hours: i64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            silence_threshold_seconds: DEFAULT_SILENCE_THRESHOLD_SECONDS,
            schedule_horizon_hours: DEFAULT_SCHEDULE_HORIZON_HOURS,
        }
    }
}

impl WatchConfig {
    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, WatchError> {
        let raw_json = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    config_path = %path.display(),
                    "Config file not found, using defaults"
                );
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(WatchError::Io {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let config = serde_json::from_str::<WatchConfig>(&raw_json).map_err(|error| {
            WatchError::Json {
                origin: format!("'{}'", path.display()),
                source: error,
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WatchError> {
        if self.silence_threshold_seconds < 0 {
            return Err(WatchError::InvalidConfig(format!(
                "silenceThresholdSeconds must not be negative, got {}",
                self.silence_threshold_seconds
            )));
        }

        if self.schedule_horizon_hours < 0 {
            return Err(WatchError::InvalidConfig(format!(
                "scheduleHorizonHours must not be negative, got {}",
                self.schedule_horizon_hours
            )));
        }

        Ok(())
    }
}
