// simulation.rs
use crate::config::{ConfigError, SimulationConfig};
use crate::control_system::{
    Axis, AxisMap, GreenTimeAdvisor, LightState, TrafficLightController,
};
use crate::fuzzy::FuzzyError;
use crate::global_variables::{SPAWN_RATE_RANGE, VEHICLE_PALETTE};
use crate::monitoring::phase_log::PhaseLog;
use crate::monitoring::snapshots::SnapshotWriter;
use crate::shared_data::{IntersectionSnapshot, PhaseChange, PhaseChangeRecord};
use crate::simulation_engine::geometry::RoadGeometry;
use crate::simulation_engine::intersections::{IntersectionState, SignalTiming};
use crate::simulation_engine::vehicles::{Lane, Vehicle};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Display;
use std::future::Future;
use thiserror::Error;
use tokio::time::{interval, Duration, MissedTickBehavior};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("phase log: {0}")]
    PhaseLog(#[from] csv::Error),
    #[error("snapshot stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub spawned: Vec<u64>,
    pub phase_change: Option<PhaseChange>,
    pub exited: usize,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub vehicles_spawned: u64,
    pub vehicles_exited: u64,
    pub phase_changes: u64,
    pub mean_green: Option<f64>,
}

/// Owns the intersection and everything random about the run.
pub struct Simulation<C = TrafficLightController> {
    config: SimulationConfig,
    intersection: IntersectionState<C>,
    rng: StdRng,
    spawn_rates: AxisMap<f64>,
    last_spawn: AxisMap<Option<u64>>,
    next_vehicle_id: u64,
    tick: u64,
    summary: RunSummary,
    green_total: f64,
    green_count: u64,
}

impl Simulation<TrafficLightController> {
    /// One fuzzy controller per axis.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let controllers = AxisMap::new(
            TrafficLightController::new("horizontal")?,
            TrafficLightController::new("vertical")?,
        );
        Self::with_controllers(config, controllers)
    }
}

impl<C: GreenTimeAdvisor> Simulation<C> {
    pub fn with_controllers(
        config: SimulationConfig,
        controllers: AxisMap<C>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let spawn_rates = config.spawn_rates.unwrap_or_else(|| {
            AxisMap::from_fn(|_| rng.random_range(SPAWN_RATE_RANGE.0..SPAWN_RATE_RANGE.1))
        });

        let geometry = RoadGeometry::from_canvas(config.width, config.height);
        let timing = SignalTiming {
            initial_green: config.initial_green,
            empty_approach_green: config.empty_approach_green,
            yellow: config.yellow_duration,
        };
        let intersection =
            IntersectionState::new(controllers, geometry, timing, config.tick_seconds);

        info!("=== Traffic Simulation Started ===");
        info!("Horizontal spawn rate: {:.3}", spawn_rates.horizontal);
        info!("Vertical spawn rate: {:.3}", spawn_rates.vertical);

        Ok(Self {
            config,
            intersection,
            rng,
            spawn_rates,
            last_spawn: AxisMap::default(),
            next_vehicle_id: 0,
            tick: 0,
            summary: RunSummary::default(),
            green_total: 0.0,
            green_count: 0,
        })
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.tick as f64 * self.config.tick_seconds
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn spawn_rates(&self) -> AxisMap<f64> {
        self.spawn_rates
    }

    pub fn intersection(&self) -> &IntersectionState<C> {
        &self.intersection
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.tick,
            mean_green: (self.green_count > 0)
                .then(|| self.green_total / self.green_count as f64),
            ..self.summary
        }
    }

    /// Spawn, lights, motion, pruning, in that order.
    pub fn step(&mut self) -> TickReport {
        self.tick += 1;

        let spawned = self.spawn_vehicles();
        let phase_change = self.intersection.advance_lights();
        self.intersection.move_vehicles();
        let exited = self.intersection.prune_vehicles();

        self.summary.vehicles_spawned += spawned.len() as u64;
        self.summary.vehicles_exited += exited as u64;
        if let Some(change) = &phase_change {
            self.summary.phase_changes += 1;
            if change.state == LightState::Green {
                self.green_total += change.green_duration;
                self.green_count += 1;
            }
        }

        TickReport {
            tick: self.tick,
            spawned,
            phase_change,
            exited,
        }
    }

    fn spawn_vehicles(&mut self) -> Vec<u64> {
        let mut spawned = Vec::new();
        for axis in Axis::ALL {
            let gap_ok = match self.last_spawn[axis] {
                Some(last) => {
                    (self.tick - last) as f64 * self.config.tick_seconds > self.config.min_spawn_gap
                }
                None => true,
            };
            let roll: f64 = self.rng.random();
            if roll >= self.spawn_rates[axis] || !gap_ok {
                continue;
            }

            let geometry = self.intersection.geometry();
            let lanes = Lane::lanes_of(axis);
            let lane = lanes[self.rng.random_range(0..lanes.len())];
            let jitter = self.rng.random_range(0.0..=geometry.spawn_jitter);
            let color = VEHICLE_PALETTE[self.rng.random_range(0..VEHICLE_PALETTE.len())];
            let position = geometry.spawn_position(lane, jitter);
            let vehicle = Vehicle::new(
                self.next_vehicle_id,
                lane,
                position,
                self.config.max_speed,
                color,
            );

            if self.is_spawn_blocked(&vehicle) {
                continue;
            }

            debug!("Spawned vehicle {} on {:?}", vehicle.id(), lane);
            spawned.push(vehicle.id());
            self.intersection.add_vehicle(vehicle);
            self.next_vehicle_id += 1;
            self.last_spawn[axis] = Some(self.tick);
        }
        spawned
    }

    // Any vehicle on the same axis within twice the minimum spacing blocks the spawn.
    fn is_spawn_blocked(&self, candidate: &Vehicle) -> bool {
        let clearance = self.intersection.geometry().min_spacing * 2.0;
        self.intersection
            .vehicles()
            .iter()
            .filter(|v| v.axis() == candidate.axis())
            .any(|v| (v.along() - candidate.along()).abs() < clearance)
    }

    pub fn snapshot(&self) -> IntersectionSnapshot {
        IntersectionSnapshot {
            tick: self.tick,
            time: self.time(),
            horizontal: self.intersection.light_view(Axis::Horizontal),
            vertical: self.intersection.light_view(Axis::Vertical),
            green_duration: self.intersection.green_duration(),
            vehicles: self.intersection.vehicle_views(),
        }
    }
}

/// Resolves when `signal` does. If the signal cannot be listened for, logs
/// the failure and never resolves, so the run continues to `max_ticks`.
pub async fn shutdown_on<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Shutdown future for Ctrl-C.
pub async fn ctrl_c_shutdown() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

/// Runs the fuzzy-controlled simulation until `shutdown` resolves or
/// `max_ticks` is reached, pacing ticks at `tick_rate_hz`.
pub async fn run_simulation<F>(
    config: SimulationConfig,
    shutdown: F,
) -> Result<RunSummary, SimulationError>
where
    F: Future<Output = ()>,
{
    let mut simulation = Simulation::new(config.clone())?;

    let mut phase_log = match &config.phase_log_path {
        Some(path) => Some(PhaseLog::create(path)?),
        None => None,
    };
    let mut snapshots = match &config.snapshot_path {
        Some(path) => Some(SnapshotWriter::create(path)?),
        None => None,
    };

    let mut pacing = (config.tick_rate_hz > 0).then(|| {
        let mut ticker = interval(Duration::from_secs_f64(1.0 / config.tick_rate_hz as f64));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    tokio::pin!(shutdown);

    loop {
        if config.max_ticks.is_some_and(|max| simulation.tick() >= max) {
            break;
        }

        match pacing.as_mut() {
            Some(ticker) => {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        info!("Shutdown requested");
                        break;
                    }
                    _ = ticker.tick() => {}
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        info!("Shutdown requested");
                        break;
                    }
                    _ = tokio::task::yield_now() => {}
                }
            }
        }

        let report = simulation.step();

        if let (Some(log), Some(change)) = (phase_log.as_mut(), report.phase_change.as_ref()) {
            log.append(&PhaseChangeRecord::new(report.tick, simulation.time(), change))?;
        }
        if let Some(writer) = snapshots.as_mut() {
            if report.tick % config.snapshot_every == 0 {
                writer.write(&simulation.snapshot())?;
            }
        }
    }

    if let Some(log) = phase_log.as_mut() {
        log.flush()?;
    }
    if let Some(writer) = snapshots.as_mut() {
        writer.flush()?;
    }

    let summary = simulation.summary();
    info!(
        "Simulation ended after {} ticks: {} vehicles spawned, {} exited, {} phase changes",
        summary.ticks, summary.vehicles_spawned, summary.vehicles_exited, summary.phase_changes
    );
    Ok(summary)
}
