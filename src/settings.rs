//! Host settings
//!
//! Runtime knobs for the hosts (seed, pacing, reporting). Board geometry and
//! physics constants are compile-time and live in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Host settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for drop jitter; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Pacing ===
    /// Simulated seconds for the native headless run
    pub run_seconds: f64,
    /// Frame delta fed to the session when running headless
    pub frame_dt: f64,
    /// Pace frames against the wall clock instead of running flat out
    pub realtime: bool,

    // === Reporting ===
    /// Seconds of simulated time between pile reports (0 disables)
    pub report_interval: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            run_seconds: 60.0,
            frame_dt: 1.0 / 60.0,
            realtime: false,

            report_interval: 10.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.frame_dt > 0.0 && self.frame_dt.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "frame_dt",
                reason: format!("must be a positive number of seconds, got {}", self.frame_dt),
            });
        }
        if !(self.run_seconds >= 0.0 && self.run_seconds.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "run_seconds",
                reason: format!("must be non-negative, got {}", self.run_seconds),
            });
        }
        if !(self.report_interval >= 0.0 && self.report_interval.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "report_interval",
                reason: format!("must be non-negative, got {}", self.report_interval),
            });
        }
        Ok(())
    }

    /// Seed to use, drawing one from the system clock when unset
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Number of frames the headless run lasts
    pub fn frame_count(&self) -> u64 {
        (self.run_seconds / self.frame_dt).ceil() as u64
    }
}
