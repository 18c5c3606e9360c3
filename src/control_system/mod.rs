// control_system/mod.rs
pub mod light_state;
pub mod traffic_light_controller;

pub use light_state::{next_phase, Axis, AxisMap, LightState, PhaseTimings, SignalPhase};
pub use traffic_light_controller::{GreenTime, GreenTimeAdvisor, TrafficLightController};
