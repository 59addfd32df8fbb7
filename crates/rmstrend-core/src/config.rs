//! Configuration for the simulator, the zone bands and log export.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//!
//! ```json
//! {
//!   "simulator": { "speed": 10, "window_capacity": 5000 },
//!   "zones": { "satisfactory": 0.28, "unsatisfactory": 1.12, "unacceptable": 2.8 },
//!   "export": { "logs_dir": "/var/tmp/rms" }
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sample::DEFAULT_WINDOW_CAPACITY;
use crate::zones::ZoneThresholds;

/// Parameters of the signal model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// RMS value at startup, mm/s.
    pub base_value: f64,
    /// Half-width of the uniform per-tick noise at 1x speed.
    pub noise_amplitude: f64,
    /// Per-tick drift at 1x speed when a trend is selected.
    pub drift_step: f64,
    /// Physical floor applied after every automatic step.
    pub floor: f64,
    /// Capacity of the live window.
    pub window_capacity: usize,
    /// Initial speed multiplier.
    pub speed: u32,
    /// Wall-clock tick interval of the live driver, in milliseconds.
    pub tick_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_value: 1.0,
            noise_amplitude: 0.0002,
            drift_step: 0.00001,
            floor: 0.0,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            speed: 1,
            tick_ms: 1,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> io::Result<()> {
        let finite = [
            ("base_value", self.base_value),
            ("noise_amplitude", self.noise_amplitude),
            ("drift_step", self.drift_step),
            ("floor", self.floor),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(invalid(format!("simulator.{name} must be finite, got {v}")));
            }
        }
        if self.noise_amplitude < 0.0 || self.drift_step < 0.0 {
            return Err(invalid("simulator noise_amplitude and drift_step must be >= 0"));
        }
        if self.window_capacity == 0 {
            return Err(invalid("simulator.window_capacity must be positive"));
        }
        if self.speed == 0 {
            return Err(invalid("simulator.speed must be a positive integer"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("simulator.tick_ms must be positive"));
        }
        Ok(())
    }
}

/// Where exported logs go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub logs_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("rms_logs"),
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulator: SimulatorConfig,
    pub zones: ZoneThresholds,
    pub export: ExportConfig,
}

impl Config {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(raw: &str) -> io::Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| invalid(format!("failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> io::Result<()> {
        self.simulator.validate()?;
        self.zones.validate()
    }

    pub fn to_json_pretty(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(io::Error::other)
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}
