// simulation_engine/vehicles.rs

use crate::control_system::{Axis, LightState};
use crate::simulation_engine::geometry::RoadGeometry;
use serde::{Deserialize, Serialize};

/// Travel lanes, named by heading. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Eastbound,
    Westbound,
    Southbound,
    Northbound,
}

impl Lane {
    pub const ALL: [Lane; 4] = [
        Lane::Eastbound,
        Lane::Westbound,
        Lane::Southbound,
        Lane::Northbound,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Lane::Eastbound | Lane::Westbound => Axis::Horizontal,
            Lane::Southbound | Lane::Northbound => Axis::Vertical,
        }
    }

    pub fn lanes_of(axis: Axis) -> [Lane; 2] {
        match axis {
            Axis::Horizontal => [Lane::Eastbound, Lane::Westbound],
            Axis::Vertical => [Lane::Southbound, Lane::Northbound],
        }
    }

    /// +1 when travel increases the along-axis coordinate, -1 otherwise.
    pub fn sign(self) -> f64 {
        match self {
            Lane::Eastbound | Lane::Southbound => 1.0,
            Lane::Westbound | Lane::Northbound => -1.0,
        }
    }
}

/// Where a vehicle stood before the current tick's update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficSample {
    pub id: u64,
    pub lane: Lane,
    pub along: f64,
}

/// A vehicle approaching or leaving the intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: u64,
    lane: Lane,
    x: f64,
    y: f64,
    max_speed: f64,
    speed: f64,
    waiting_time: f64,
    passed_intersection: bool,
    color: [u8; 3],
}

impl Vehicle {
    /// `max_speed` is a magnitude; the lane decides the sign.
    pub fn new(id: u64, lane: Lane, position: (f64, f64), max_speed: f64, color: [u8; 3]) -> Self {
        Self {
            id,
            lane,
            x: position.0,
            y: position.1,
            max_speed: max_speed.abs() * lane.sign(),
            speed: 0.0,
            waiting_time: 0.0,
            passed_intersection: false,
            color,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn axis(&self) -> Axis {
        self.lane.axis()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Coordinate along the travel axis.
    pub fn along(&self) -> f64 {
        match self.axis() {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    pub fn passed_intersection(&self) -> bool {
        self.passed_intersection
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn sample(&self) -> TrafficSample {
        TrafficSample {
            id: self.id,
            lane: self.lane,
            along: self.along(),
        }
    }

    pub fn is_in_intersection(&self, geometry: &RoadGeometry) -> bool {
        geometry
            .footprint(self.axis(), self.x, self.y)
            .overlaps(&geometry.intersection)
    }

    /// Holding for a non-green light applies only inside the stop band.
    pub fn should_stop_for_light(&self, light: LightState, geometry: &RoadGeometry) -> bool {
        if light == LightState::Green {
            return false;
        }
        geometry.in_stop_band(self.lane, self.along())
    }

    /// True if moving one step would bring this vehicle closer than the
    /// minimum spacing to a vehicle ahead in the same lane.
    pub fn is_too_close_to_vehicle_ahead(
        &self,
        traffic: &[TrafficSample],
        geometry: &RoadGeometry,
    ) -> bool {
        let me = self.along();
        let sign = self.lane.sign();
        let step = self.max_speed.abs();
        traffic
            .iter()
            .filter(|other| other.id != self.id && other.lane == self.lane)
            .any(|other| {
                let gap = (other.along - me) * sign;
                gap > 0.0 && gap - step < geometry.min_spacing
            })
    }

    /// One tick of motion. `traffic` must hold every vehicle's position from
    /// before this tick so that update order does not matter.
    pub fn update(
        &mut self,
        light: LightState,
        traffic: &[TrafficSample],
        geometry: &RoadGeometry,
        dt: f64,
    ) {
        if !self.passed_intersection && self.is_in_intersection(geometry) {
            self.passed_intersection = true;
        }

        let should_stop = self.should_stop_for_light(light, geometry)
            || self.is_too_close_to_vehicle_ahead(traffic, geometry);

        if should_stop {
            self.speed = 0.0;
            if !self.passed_intersection {
                self.waiting_time += dt;
            }
        } else {
            self.speed = self.max_speed;
        }

        match self.axis() {
            Axis::Horizontal => self.x += self.speed,
            Axis::Vertical => self.y += self.speed,
        }
    }

    pub fn is_off_screen(&self, geometry: &RoadGeometry) -> bool {
        geometry.is_outside(self.axis(), self.x, self.y)
    }
}
