// tests/controller_scenarios.rs
use fuzzy_traffic::control_system::{GreenTime, TrafficLightController};
use fuzzy_traffic::global_variables::{FALLBACK_GREEN, MAX_GREEN, MIN_GREEN};

fn controller() -> TrafficLightController {
    TrafficLightController::new("test").unwrap()
}

fn is_one_decimal(value: f64) -> bool {
    ((value * 10.0).round() - value * 10.0).abs() < 1e-9
}

#[test]
fn output_is_clamped_and_rounded_over_the_input_grid() {
    let controller = controller();
    for density in (0..=100).step_by(5) {
        for wait in (0..=120).step_by(5) {
            let green = controller.compute_green_time(density as f64, wait as f64);
            assert!(!green.is_degenerate());
            let seconds = green.seconds();
            assert!(
                (MIN_GREEN..=MAX_GREEN).contains(&seconds),
                "({density}, {wait}) -> {seconds}"
            );
            assert!(is_one_decimal(seconds), "({density}, {wait}) -> {seconds}");
        }
    }
}

#[test]
fn out_of_range_inputs_behave_like_the_nearest_bound() {
    let controller = controller();
    assert_eq!(
        controller.compute_green_time(-50.0, 500.0),
        controller.compute_green_time(0.0, 120.0)
    );
    assert_eq!(
        controller.compute_green_time(250.0, -3.0),
        controller.compute_green_time(100.0, 0.0)
    );
}

#[test]
fn non_finite_inputs_fall_back() {
    let controller = controller();
    for (density, wait) in [(f64::NAN, 10.0), (10.0, f64::NAN), (f64::NAN, f64::NAN)] {
        assert_eq!(
            controller.compute_green_time(density, wait),
            GreenTime::Degenerate(FALLBACK_GREEN)
        );
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let a = controller();
    let b = controller();
    for (density, wait) in [(12.5, 7.0), (63.0, 88.0), (99.0, 1.0)] {
        assert_eq!(
            a.compute_green_time(density, wait),
            b.compute_green_time(density, wait)
        );
        assert_eq!(
            a.compute_green_time(density, wait),
            a.compute_green_time(density, wait)
        );
    }
}

#[test]
fn heavier_demand_never_gets_a_shorter_green() {
    let controller = controller();
    let light = controller.compute_green_time(20.0, 25.0).seconds();
    let medium = controller.compute_green_time(50.0, 60.0).seconds();
    let heavy = controller.compute_green_time(85.0, 95.0).seconds();
    assert!(light <= medium);
    assert!(medium <= heavy);
}

#[test]
fn dense_or_long_waiting_traffic_gets_at_least_as_much_green() {
    let controller = controller();
    for wait in 0..=120 {
        let wait = wait as f64;
        assert!(
            controller.compute_green_time(85.0, wait).seconds()
                >= controller.compute_green_time(20.0, wait).seconds(),
            "wait {wait}"
        );
    }
    for density in 0..=100 {
        let density = density as f64;
        assert!(
            controller.compute_green_time(density, 95.0).seconds()
                >= controller.compute_green_time(density, 25.0).seconds(),
            "density {density}"
        );
    }
}

#[test]
fn light_traffic_gets_a_short_green() {
    // Only low/short fires, fully, so the centroid of the short set decides.
    let green = controller().compute_green_time(20.0, 25.0);
    assert_eq!(green, GreenTime::Ok(16.4));
}

#[test]
fn balanced_traffic_gets_a_medium_green() {
    let green = controller().compute_green_time(50.0, 60.0);
    assert_eq!(green, GreenTime::Ok(40.0));
}

#[test]
fn saturated_traffic_gets_the_maximum_green() {
    let green = controller().compute_green_time(85.0, 95.0);
    assert_eq!(green, GreenTime::Ok(MAX_GREEN));
}
