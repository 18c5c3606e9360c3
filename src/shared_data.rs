// shared_data.rs
//
// Read-only views handed to renderers, recorders and the CLI. Nothing in
// here is ever fed back into the simulation.

use crate::control_system::{Axis, LightState};
use crate::simulation_engine::intersections::Demand;
use crate::simulation_engine::vehicles::{Lane, Vehicle};
use serde::{Deserialize, Serialize};

/// Where a new green duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenSource {
    Fuzzy,
    Fallback,
    EmptyApproach,
    /// GREEN -> YELLOW keeps the current duration.
    Unchanged,
}

/// A light transition produced by the intersection state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseChange {
    pub axis: Axis,
    /// The state `axis` has just entered.
    pub state: LightState,
    pub green_duration: f64,
    pub demand: Option<Demand>,
    pub source: GreenSource,
}

/// Flat CSV row for a [`PhaseChange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseChangeRecord {
    pub tick: u64,
    pub time: f64,
    pub axis: Axis,
    pub state: LightState,
    pub green_duration: f64,
    pub pending_vehicles: usize,
    pub density: f64,
    pub average_wait: f64,
    pub source: GreenSource,
}

impl PhaseChangeRecord {
    pub fn new(tick: u64, time: f64, change: &PhaseChange) -> Self {
        let (pending_vehicles, density, average_wait) = change
            .demand
            .map(|d| (d.pending, d.density, d.average_wait))
            .unwrap_or((0, 0.0, 0.0));
        Self {
            tick,
            time,
            axis: change.axis,
            state: change.state,
            green_duration: change.green_duration,
            pending_vehicles,
            density,
            average_wait,
            source: change.source,
        }
    }
}

/// One traffic light as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightView {
    pub axis: Axis,
    pub state: LightState,
    /// Time left in the current state; zero for RED.
    pub remaining: f64,
    /// Vehicles currently on this axis.
    pub vehicles: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: u64,
    pub lane: Lane,
    pub axis: Axis,
    pub x: f64,
    pub y: f64,
    pub color: [u8; 3],
}

impl From<&Vehicle> for VehicleView {
    fn from(vehicle: &Vehicle) -> Self {
        let (x, y) = vehicle.position();
        Self {
            id: vehicle.id(),
            lane: vehicle.lane(),
            axis: vehicle.axis(),
            x,
            y,
            color: vehicle.color(),
        }
    }
}

/// Everything a renderer may draw for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSnapshot {
    pub tick: u64,
    pub time: f64,
    pub horizontal: LightView,
    pub vertical: LightView,
    pub green_duration: f64,
    pub vehicles: Vec<VehicleView>,
}
