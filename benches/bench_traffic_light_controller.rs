// benches/bench_traffic_light_controller.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, Criterion, PlotConfiguration,
};
use fuzzy_traffic::control_system::TrafficLightController;
use std::time::Duration;

// Evenly spaced (density, wait) pairs across both input universes.
fn input_grid(steps: usize) -> Vec<(f64, f64)> {
    let mut grid = Vec::with_capacity(steps * steps);
    for i in 0..steps {
        for j in 0..steps {
            let density = 100.0 * i as f64 / (steps - 1) as f64;
            let wait = 120.0 * j as f64 / (steps - 1) as f64;
            grid.push((density, wait));
        }
    }
    grid
}

fn bench_compute_green_time(c: &mut Criterion) {
    let controller = TrafficLightController::new("bench").unwrap();

    let mut group = c.benchmark_group("compute_green_time");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    group.bench_function("scenario_b", |b| {
        b.iter(|| controller.compute_green_time(black_box(50.0), black_box(60.0)));
    });

    for &steps in [5, 10, 20].iter() {
        let grid = input_grid(steps);
        group.bench_function(format!("grid_{}x{}", steps, steps), |b| {
            b.iter(|| {
                for &(density, wait) in &grid {
                    black_box(controller.compute_green_time(density, wait));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_green_time);
criterion_main!(benches);
