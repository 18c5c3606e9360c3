// global_variables.rs

// Green period clamp bounds (simulated seconds)
pub const MIN_GREEN: f64 = 15.0;
pub const MAX_GREEN: f64 = 60.0;

// Returned by the controller whenever inference cannot produce a value
pub const FALLBACK_GREEN: f64 = 30.0;

// Light timing defaults
pub const DEFAULT_INITIAL_GREEN: f64 = 30.0;
pub const DEFAULT_EMPTY_APPROACH_GREEN: f64 = 20.0;
pub const DEFAULT_YELLOW: f64 = 4.0;

// Driver pacing
pub const DEFAULT_TICK_SECONDS: f64 = 0.1;
pub const DEFAULT_TICK_RATE_HZ: u32 = 10;

// Vehicles
pub const DEFAULT_MAX_SPEED: f64 = 2.5;
pub const SPAWN_RATE_RANGE: (f64, f64) = (0.03, 0.12);
pub const DEFAULT_MIN_SPAWN_GAP: f64 = 0.5;

// Density fed to the controller per pending vehicle, capped at 100
pub const DENSITY_PER_VEHICLE: f64 = 10.0;

// Canvas the geometry ratios were tuned on
pub const DEFAULT_CANVAS_WIDTH: f64 = 1000.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 700.0;

// Intersection cell, as fractions of the canvas
pub const INTERSECTION_X_RATIO: (f64, f64) = (0.40, 0.55);
pub const INTERSECTION_Y_RATIO: (f64, f64) = (3.0 / 7.0, 4.0 / 7.0);

// Lane centre lines, as fractions across the intersection cell
pub const NEAR_LANE_RATIO: f64 = 0.4;
pub const FAR_LANE_RATIO: f64 = 0.6;

// Everything below is in multiples of the intersection cell height
pub const VEHICLE_LENGTH_RATIO: f64 = 0.3;
pub const VEHICLE_WIDTH_RATIO: f64 = 0.2;
pub const MIN_SPACING_RATIO: f64 = 0.4;
pub const STOP_LINE_OFFSET_RATIO: f64 = 0.5;
pub const EXIT_BUFFER_RATIO: f64 = 2.0;
pub const SPAWN_DISTANCE_RATIO: f64 = 1.0;
pub const SPAWN_JITTER_RATIO: f64 = 1.0;

/// Colour tags handed to renderers; the core never looks at them.
pub const VEHICLE_PALETTE: [[u8; 3]; 9] = [
    [255, 100, 100],
    [100, 255, 100],
    [100, 100, 255],
    [255, 255, 100],
    [255, 100, 255],
    [100, 255, 255],
    [200, 150, 100],
    [150, 200, 100],
    [200, 100, 150],
];
