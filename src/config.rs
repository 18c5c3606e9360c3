// config.rs

use crate::control_system::AxisMap;
use crate::global_variables::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation settings. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Simulated time per tick.
    pub tick_seconds: f64,
    /// Wall-clock pacing of the tick loop; 0 runs unpaced.
    pub tick_rate_hz: u32,
    pub max_ticks: Option<u64>,
    pub initial_green: f64,
    pub empty_approach_green: f64,
    pub yellow_duration: f64,
    pub max_speed: f64,
    /// Per-axis spawn probability per tick; `None` draws both at random.
    pub spawn_rates: Option<AxisMap<f64>>,
    /// Minimum simulated time between two spawns on the same axis.
    pub min_spawn_gap: f64,
    pub width: f64,
    pub height: f64,
    pub phase_log_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub snapshot_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_seconds: DEFAULT_TICK_SECONDS,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_ticks: None,
            initial_green: DEFAULT_INITIAL_GREEN,
            empty_approach_green: DEFAULT_EMPTY_APPROACH_GREEN,
            yellow_duration: DEFAULT_YELLOW,
            max_speed: DEFAULT_MAX_SPEED,
            spawn_rates: None,
            min_spawn_gap: DEFAULT_MIN_SPAWN_GAP,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            phase_log_path: None,
            snapshot_path: None,
            snapshot_every: 10,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file and validates it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tick_seconds", self.tick_seconds),
            ("initial_green", self.initial_green),
            ("empty_approach_green", self.empty_approach_green),
            ("yellow_duration", self.yellow_duration),
            ("max_speed", self.max_speed),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.min_spawn_gap.is_finite() && self.min_spawn_gap >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_spawn_gap must not be negative, got {}",
                self.min_spawn_gap
            )));
        }
        if let Some(rates) = &self.spawn_rates {
            for rate in [rates.horizontal, rates.vertical] {
                if !(0.0..=1.0).contains(&rate) {
                    return Err(ConfigError::Invalid(format!(
                        "spawn rate must be within [0, 1], got {rate}"
                    )));
                }
            }
        }
        if self.snapshot_every == 0 {
            return Err(ConfigError::Invalid("snapshot_every must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.yellow_duration, 4.0);
        assert_eq!(config.tick_rate_hz, 10);
    }

    #[test]
    fn partial_override() {
        let config = SimulationConfig::from_json(
            r#"{ "seed": 7, "spawn_rates": { "horizontal": 0.1, "vertical": 0.05 } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.spawn_rates, Some(AxisMap::new(0.1, 0.05)));
        assert_eq!(config.max_speed, 2.5);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "yellow_duration": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "spawn_rates": { "horizontal": 1.5, "vertical": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
