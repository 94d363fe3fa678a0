//! Runtime settings
//!
//! Stored as JSON next to the binary; every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{TICK_RATE, TIME_LIMIT_SECS};
use crate::sim::{InputMode, RoundConfig};

/// What the reticle does when the sensor stops sending samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleInput {
    /// Keep steering with the last sample received
    #[default]
    Hold,
    /// Treat the stick as centered once no sample arrived for this many ticks
    ZeroAfter { ticks: u32 },
}

/// Which boundary routes write a log line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteLogging {
    pub ingest: bool,
    pub score: bool,
    pub view: bool,
    pub scoreboard: bool,
    pub clear: bool,
    pub not_found: bool,
}

impl Default for RouteLogging {
    fn default() -> Self {
        Self {
            ingest: false,
            score: true,
            view: true,
            scoreboard: true,
            clear: true,
            not_found: true,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Analog response curve
    pub input_mode: InputMode,
    /// Round length in seconds
    pub time_limit_secs: u32,
    /// Host animation callbacks per second
    pub tick_rate: u32,
    /// RNG seed (derived from the clock when absent)
    pub seed: Option<u64>,

    // === Boundary ===
    pub stale_input: StaleInput,
    /// Whether `/clear` also empties the leaderboard
    pub clear_leaderboard_on_clear: bool,
    pub route_logging: RouteLogging,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_mode: InputMode::DualZone,
            time_limit_secs: TIME_LIMIT_SECS,
            tick_rate: TICK_RATE,
            seed: None,

            stale_input: StaleInput::Hold,
            // The reference server only clears the data log
            clear_leaderboard_on_clear: false,
            route_logging: RouteLogging::default(),
        }
    }
}

impl Settings {
    /// Round timing derived from these settings
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            time_limit_secs: self.time_limit_secs,
            tick_rate: self.tick_rate.max(1),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
