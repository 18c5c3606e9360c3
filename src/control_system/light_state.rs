// control_system/light_state.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The two conflicting traffic axes at the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "HORIZONTAL"),
            Axis::Vertical => write!(f, "VERTICAL"),
        }
    }
}

/// One value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisMap<T> {
    pub horizontal: T,
    pub vertical: T,
}

impl<T> AxisMap<T> {
    pub fn new(horizontal: T, vertical: T) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            horizontal: f(Axis::Horizontal),
            vertical: f(Axis::Vertical),
        }
    }
}

impl<T> Index<Axis> for AxisMap<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}

impl<T> IndexMut<Axis> for AxisMap<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }
}

/// The possible states for a traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LightState::Green => write!(f, "GREEN"),
            LightState::Yellow => write!(f, "YELLOW"),
            LightState::Red => write!(f, "RED"),
        }
    }
}

/// Which axis currently holds right of way, and how.
///
/// The other axis is always RED, so the two lights can never both be
/// GREEN or YELLOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalPhase {
    Green(Axis),
    Yellow(Axis),
}

impl SignalPhase {
    pub fn active_axis(self) -> Axis {
        match self {
            SignalPhase::Green(axis) | SignalPhase::Yellow(axis) => axis,
        }
    }

    pub fn light(self, axis: Axis) -> LightState {
        match self {
            SignalPhase::Green(active) if active == axis => LightState::Green,
            SignalPhase::Yellow(active) if active == axis => LightState::Yellow,
            _ => LightState::Red,
        }
    }

    pub fn lights(self) -> AxisMap<LightState> {
        AxisMap::from_fn(|axis| self.light(axis))
    }
}

/// Durations the phase timer is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimings {
    pub green: f64,
    pub yellow: f64,
}

/// Pure transition function: the phase that follows `phase` once `elapsed`
/// time has been spent in it, or `None` if it holds.
///
/// GREEN(a) -> YELLOW(a) after `green`; YELLOW(a) -> GREEN(other) after `yellow`.
pub fn next_phase(phase: SignalPhase, elapsed: f64, timings: PhaseTimings) -> Option<SignalPhase> {
    match phase {
        SignalPhase::Green(axis) if elapsed >= timings.green => Some(SignalPhase::Yellow(axis)),
        SignalPhase::Yellow(axis) if elapsed >= timings.yellow => {
            Some(SignalPhase::Green(axis.other()))
        }
        _ => None,
    }
}

/// Time left in the current state of `axis`'s light. RED reports zero.
pub fn remaining(phase: SignalPhase, axis: Axis, elapsed: f64, timings: PhaseTimings) -> f64 {
    let left = match phase.light(axis) {
        LightState::Green => timings.green - elapsed,
        LightState::Yellow => timings.yellow - elapsed,
        LightState::Red => 0.0,
    };
    left.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMINGS: PhaseTimings = PhaseTimings {
        green: 30.0,
        yellow: 4.0,
    };

    #[test]
    fn green_holds_until_duration() {
        let phase = SignalPhase::Green(Axis::Horizontal);
        assert_eq!(next_phase(phase, 29.9, TIMINGS), None);
        assert_eq!(
            next_phase(phase, 30.0, TIMINGS),
            Some(SignalPhase::Yellow(Axis::Horizontal))
        );
    }

    #[test]
    fn yellow_hands_over_to_other_axis() {
        let phase = SignalPhase::Yellow(Axis::Horizontal);
        assert_eq!(next_phase(phase, 3.9, TIMINGS), None);
        assert_eq!(
            next_phase(phase, 4.0, TIMINGS),
            Some(SignalPhase::Green(Axis::Vertical))
        );
        assert_eq!(
            next_phase(SignalPhase::Yellow(Axis::Vertical), 4.0, TIMINGS),
            Some(SignalPhase::Green(Axis::Horizontal))
        );
    }

    #[test]
    fn lights_are_mutually_exclusive() {
        for axis in Axis::ALL {
            for phase in [SignalPhase::Green(axis), SignalPhase::Yellow(axis)] {
                let lights = phase.lights();
                assert_eq!(lights[axis.other()], LightState::Red);
                assert_ne!(lights[axis], LightState::Red);
            }
        }
    }

    #[test]
    fn remaining_time_per_light() {
        let phase = SignalPhase::Green(Axis::Vertical);
        assert_eq!(remaining(phase, Axis::Vertical, 10.0, TIMINGS), 20.0);
        assert_eq!(remaining(phase, Axis::Horizontal, 10.0, TIMINGS), 0.0);
        assert_eq!(
            remaining(SignalPhase::Yellow(Axis::Vertical), Axis::Vertical, 5.0, TIMINGS),
            0.0
        );
    }
}
