// simulation_engine/geometry.rs

use crate::control_system::Axis;
use crate::global_variables::*;
use crate::simulation_engine::vehicles::Lane;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `left <= right`, `top <= bottom` (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Road layout of a single four-way intersection, derived from the canvas
/// size so proportions hold at any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadGeometry {
    pub width: f64,
    pub height: f64,
    pub intersection: Rect,
    pub vehicle_length: f64,
    pub vehicle_width: f64,
    pub min_spacing: f64,
    pub stop_line_offset: f64,
    pub exit_buffer: f64,
    pub spawn_distance: f64,
    pub spawn_jitter: f64,
}

impl Default for RoadGeometry {
    fn default() -> Self {
        Self::from_canvas(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl RoadGeometry {
    pub fn from_canvas(width: f64, height: f64) -> Self {
        let intersection = Rect {
            left: width * INTERSECTION_X_RATIO.0,
            right: width * INTERSECTION_X_RATIO.1,
            top: height * INTERSECTION_Y_RATIO.0,
            bottom: height * INTERSECTION_Y_RATIO.1,
        };
        let unit = intersection.height();

        Self {
            width,
            height,
            intersection,
            vehicle_length: unit * VEHICLE_LENGTH_RATIO,
            vehicle_width: unit * VEHICLE_WIDTH_RATIO,
            min_spacing: unit * MIN_SPACING_RATIO,
            stop_line_offset: unit * STOP_LINE_OFFSET_RATIO,
            exit_buffer: unit * EXIT_BUFFER_RATIO,
            spawn_distance: unit * SPAWN_DISTANCE_RATIO,
            spawn_jitter: unit * SPAWN_JITTER_RATIO,
        }
    }

    /// Fixed cross-axis coordinate of a lane (y for horizontal lanes, x for vertical).
    pub fn lane_offset(&self, lane: Lane) -> f64 {
        let cell = &self.intersection;
        match lane {
            Lane::Eastbound => cell.top + cell.height() * NEAR_LANE_RATIO,
            Lane::Westbound => cell.top + cell.height() * FAR_LANE_RATIO,
            Lane::Southbound => cell.left + cell.width() * NEAR_LANE_RATIO,
            Lane::Northbound => cell.left + cell.width() * FAR_LANE_RATIO,
        }
    }

    /// Range of along-axis reference positions in which a vehicle must hold
    /// for a non-green light, as `(low, high)`. The band ends where the
    /// vehicle's leading edge would touch the intersection; that end is
    /// excluded, see [`RoadGeometry::in_stop_band`].
    pub fn stop_band(&self, lane: Lane) -> (f64, f64) {
        let cell = &self.intersection;
        let offset = self.stop_line_offset;
        // Eastbound and southbound reference corners are the vehicle's rear.
        let length = self.vehicle_length;
        match lane {
            Lane::Eastbound => (cell.left - length - offset, cell.left - length),
            Lane::Westbound => (cell.right, cell.right + offset),
            Lane::Southbound => (cell.top - length - offset, cell.top - length),
            Lane::Northbound => (cell.bottom, cell.bottom + offset),
        }
    }

    /// True if `along` lies in the lane's stop band. A vehicle held here
    /// never overlaps the intersection.
    pub fn in_stop_band(&self, lane: Lane, along: f64) -> bool {
        let (low, high) = self.stop_band(lane);
        if lane.sign() > 0.0 {
            low <= along && along < high
        } else {
            low < along && along <= high
        }
    }

    /// Spawn point `jitter` further out than the nominal entry point.
    pub fn spawn_position(&self, lane: Lane, jitter: f64) -> (f64, f64) {
        let out = self.spawn_distance + jitter;
        let cross = self.lane_offset(lane);
        match lane {
            Lane::Eastbound => (-out, cross),
            Lane::Westbound => (self.width + out, cross),
            Lane::Southbound => (cross, -out),
            Lane::Northbound => (cross, self.height + out),
        }
    }

    /// Footprint of a vehicle whose reference corner sits at (x, y).
    pub fn footprint(&self, axis: Axis, x: f64, y: f64) -> Rect {
        let (w, h) = match axis {
            Axis::Horizontal => (self.vehicle_length, self.vehicle_width),
            Axis::Vertical => (self.vehicle_width, self.vehicle_length),
        };
        Rect {
            left: x,
            top: y,
            right: x + w,
            bottom: y + h,
        }
    }

    /// True once a vehicle has left the canvas by more than the exit buffer.
    pub fn is_outside(&self, axis: Axis, x: f64, y: f64) -> bool {
        let b = self.exit_buffer;
        match axis {
            Axis::Horizontal => x < -b || x > self.width + b,
            Axis::Vertical => y < -b || y > self.height + b,
        }
    }
}
