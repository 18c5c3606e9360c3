// benches/bench_simulation_tick.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, Criterion, PlotConfiguration,
};
use fuzzy_traffic::config::SimulationConfig;
use fuzzy_traffic::control_system::AxisMap;
use fuzzy_traffic::simulation_engine::simulation::Simulation;
use std::time::Duration;

// A seeded simulation already carrying traffic after `warm_ticks` steps.
fn populated_simulation(rate: f64, warm_ticks: u64) -> Simulation {
    let config = SimulationConfig {
        seed: Some(42),
        tick_rate_hz: 0,
        spawn_rates: Some(AxisMap::new(rate, rate)),
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(config).unwrap();
    for _ in 0..warm_ticks {
        simulation.step();
    }
    simulation
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &rate in [0.03, 0.12, 0.5].iter() {
        group.bench_function(format!("spawn_rate_{}", rate), |b| {
            let mut simulation = populated_simulation(rate, 1_000);
            b.iter(|| {
                black_box(simulation.step());
            });
        });
    }

    group.bench_function("snapshot", |b| {
        let simulation = populated_simulation(0.12, 1_000);
        b.iter(|| black_box(simulation.snapshot()));
    });
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
