// simulation_engine/intersections.rs

use crate::control_system::light_state::{next_phase, remaining};
use crate::control_system::{
    Axis, AxisMap, GreenTime, GreenTimeAdvisor, LightState, PhaseTimings, SignalPhase,
};
use crate::global_variables::DENSITY_PER_VEHICLE;
use crate::shared_data::{GreenSource, LightView, PhaseChange, VehicleView};
use crate::simulation_engine::geometry::RoadGeometry;
use crate::simulation_engine::vehicles::{TrafficSample, Vehicle};
use log::{debug, info};

/// Live demand on one approach, as fed to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demand {
    pub pending: usize,
    pub density: f64,
    pub average_wait: f64,
}

/// Density and mean wait of vehicles on `axis` that have not yet crossed.
/// `None` when nothing is pending.
pub fn approach_demand(vehicles: &[Vehicle], axis: Axis) -> Option<Demand> {
    let (pending, total_wait) = vehicles
        .iter()
        .filter(|v| v.axis() == axis && !v.passed_intersection())
        .fold((0usize, 0.0), |(n, wait), v| (n + 1, wait + v.waiting_time()));
    if pending == 0 {
        return None;
    }
    Some(Demand {
        pending,
        density: (pending as f64 * DENSITY_PER_VEHICLE).min(100.0),
        average_wait: total_wait / pending as f64,
    })
}

/// Fixed timing parameters of the signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalTiming {
    pub initial_green: f64,
    pub empty_approach_green: f64,
    pub yellow: f64,
}

/// A single signalised intersection: both lights, the shared phase timer,
/// one controller per axis, and every vehicle on the roads.
pub struct IntersectionState<C> {
    phase: SignalPhase,
    ticks_in_phase: u64,
    tick_seconds: f64,
    green_duration: f64,
    timing: SignalTiming,
    controllers: AxisMap<C>,
    geometry: RoadGeometry,
    vehicles: Vec<Vehicle>,
}

impl<C: GreenTimeAdvisor> IntersectionState<C> {
    /// Starts with horizontal GREEN and vertical RED.
    pub fn new(
        controllers: AxisMap<C>,
        geometry: RoadGeometry,
        timing: SignalTiming,
        tick_seconds: f64,
    ) -> Self {
        Self {
            phase: SignalPhase::Green(Axis::Horizontal),
            ticks_in_phase: 0,
            tick_seconds,
            green_duration: timing.initial_green,
            timing,
            controllers,
            geometry,
            vehicles: Vec::new(),
        }
    }

    pub fn phase(&self) -> SignalPhase {
        self.phase
    }

    pub fn light(&self, axis: Axis) -> LightState {
        self.phase.light(axis)
    }

    pub fn lights(&self) -> AxisMap<LightState> {
        self.phase.lights()
    }

    pub fn green_duration(&self) -> f64 {
        self.green_duration
    }

    pub fn elapsed(&self) -> f64 {
        self.ticks_in_phase as f64 * self.tick_seconds
    }

    pub fn geometry(&self) -> &RoadGeometry {
        &self.geometry
    }

    pub fn controllers(&self) -> &AxisMap<C> {
        &self.controllers
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    fn timings(&self) -> PhaseTimings {
        PhaseTimings {
            green: self.green_duration,
            yellow: self.timing.yellow,
        }
    }

    pub fn remaining(&self, axis: Axis) -> f64 {
        remaining(self.phase, axis, self.elapsed(), self.timings())
    }

    /// Advances the phase timer by one tick and applies at most one transition.
    pub fn advance_lights(&mut self) -> Option<PhaseChange> {
        self.ticks_in_phase += 1;
        let next = next_phase(self.phase, self.elapsed(), self.timings())?;
        self.phase = next;
        self.ticks_in_phase = 0;

        match next {
            SignalPhase::Yellow(axis) => {
                debug!("{} GREEN -> YELLOW", axis);
                Some(PhaseChange {
                    axis,
                    state: LightState::Yellow,
                    green_duration: self.green_duration,
                    demand: None,
                    source: GreenSource::Unchanged,
                })
            }
            SignalPhase::Green(axis) => Some(self.start_green(axis)),
        }
    }

    // Recomputes the green period for the axis that has just turned GREEN.
    fn start_green(&mut self, axis: Axis) -> PhaseChange {
        let demand = approach_demand(&self.vehicles, axis);
        let (green, source) = match demand {
            Some(d) => match self.controllers[axis].compute_green_time(d.density, d.average_wait) {
                GreenTime::Ok(s) => (s, GreenSource::Fuzzy),
                GreenTime::Degenerate(s) => (s, GreenSource::Fallback),
            },
            None => (self.timing.empty_approach_green, GreenSource::EmptyApproach),
        };
        self.green_duration = green;

        match demand {
            Some(d) => info!(
                "{}: Vehicles={}, Density={:.1}%, Wait={:.1}s -> Green={:.1}s",
                axis, d.pending, d.density, d.average_wait, green
            ),
            None => info!("{}: no vehicles pending -> Green={:.1}s", axis, green),
        }

        PhaseChange {
            axis,
            state: LightState::Green,
            green_duration: green,
            demand,
            source,
        }
    }

    /// Moves every vehicle one tick against a snapshot of pre-tick positions.
    pub fn move_vehicles(&mut self) {
        let traffic: Vec<TrafficSample> = self.vehicles.iter().map(Vehicle::sample).collect();
        let lights = self.lights();
        let dt = self.tick_seconds;
        for vehicle in &mut self.vehicles {
            vehicle.update(lights[vehicle.axis()], &traffic, &self.geometry, dt);
        }
    }

    /// Drops vehicles that have left the canvas; returns how many.
    pub fn prune_vehicles(&mut self) -> usize {
        let before = self.vehicles.len();
        let geometry = &self.geometry;
        self.vehicles.retain(|v| {
            let gone = v.is_off_screen(geometry);
            if gone {
                debug!("Vehicle {} exited on {:?}", v.id(), v.lane());
            }
            !gone
        });
        before - self.vehicles.len()
    }

    pub fn light_view(&self, axis: Axis) -> LightView {
        LightView {
            axis,
            state: self.light(axis),
            remaining: self.remaining(axis),
            vehicles: self.vehicles.iter().filter(|v| v.axis() == axis).count(),
        }
    }

    pub fn vehicle_views(&self) -> Vec<VehicleView> {
        self.vehicles.iter().map(VehicleView::from).collect()
    }
}
