// control_system/traffic_light_controller.rs

use crate::fuzzy::{FuzzyError, InferenceEngine};
use crate::global_variables::{FALLBACK_GREEN, MAX_GREEN, MIN_GREEN};
use log::warn;

/// Outcome of a green-time computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GreenTime {
    /// Inference succeeded; value already clamped and rounded.
    Ok(f64),
    /// Inference failed and the safe fallback was used instead.
    Degenerate(f64),
}

impl GreenTime {
    pub fn seconds(self) -> f64 {
        match self {
            GreenTime::Ok(s) | GreenTime::Degenerate(s) => s,
        }
    }

    pub fn is_degenerate(self) -> bool {
        matches!(self, GreenTime::Degenerate(_))
    }
}

/// Anything the intersection can ask for a green duration.
pub trait GreenTimeAdvisor {
    fn compute_green_time(&self, density: f64, wait: f64) -> GreenTime;
}

/// Fuzzy green-time controller for one traffic direction.
#[derive(Debug, Clone)]
pub struct TrafficLightController {
    name: String,
    engine: InferenceEngine,
}

impl TrafficLightController {
    /// Builds the controller with the standard traffic rule base.
    pub fn new(name: impl Into<String>) -> Result<Self, FuzzyError> {
        Ok(Self::with_engine(name, InferenceEngine::traffic()?))
    }

    pub fn with_engine(name: impl Into<String>, engine: InferenceEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Green duration in [MIN_GREEN, MAX_GREEN], rounded to one decimal.
    ///
    /// Inputs outside their universes are clamped. Failures are logged and
    /// answered with [`FALLBACK_GREEN`].
    pub fn compute_green_time(&self, density: f64, wait: f64) -> GreenTime {
        let density = self.engine.density().universe().clamp(density);
        let wait = self.engine.wait().universe().clamp(wait);

        match self.engine.infer(density, wait) {
            Ok(raw) => {
                let clamped = raw.clamp(MIN_GREEN, MAX_GREEN);
                GreenTime::Ok((clamped * 10.0).round() / 10.0)
            }
            Err(e) => {
                warn!(
                    "Fuzzy computation error for {}: {}. Using fallback {:.1}s",
                    self.name, e, FALLBACK_GREEN
                );
                GreenTime::Degenerate(FALLBACK_GREEN)
            }
        }
    }
}

impl GreenTimeAdvisor for TrafficLightController {
    fn compute_green_time(&self, density: f64, wait: f64) -> GreenTime {
        TrafficLightController::compute_green_time(self, density, wait)
    }
}
