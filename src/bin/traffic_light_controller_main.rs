// traffic_light_controller_main.rs
//
// With no arguments prints the showcase table; with `<density> <wait>`
// prints the inference trace for that one input.
use fuzzy_traffic::control_system::TrafficLightController;
use fuzzy_traffic::monitoring::cli::print_test_cases;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let controller = TrafficLightController::new("cli")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => print_test_cases(&controller),
        [density, wait] => {
            let density: f64 = density.parse()?;
            let wait: f64 = wait.parse()?;
            let engine = controller.engine();
            let trace = engine.infer_detailed(
                engine.density().universe().clamp(density),
                engine.wait().universe().clamp(wait),
            )?;

            println!("Density {}% -> {:?}", trace.density, trace.density_degrees);
            println!("Wait {}s -> {:?}", trace.wait, trace.wait_degrees);
            for (rule, strength) in engine.rules().rules().iter().zip(&trace.rule_strengths) {
                println!(
                    "  IF density is {} AND wait is {} THEN green is {}: {:.2}",
                    rule.density, rule.wait, rule.green, strength
                );
            }
            let green = controller.compute_green_time(density, wait);
            println!("Green light duration: {}s", green.seconds());
            if green.is_degenerate() {
                println!("(fallback value)");
            }
        }
        _ => return Err("usage: traffic_light_controller_main [<density> <wait>]".into()),
    }
    Ok(())
}
