// monitoring/cli.rs

use crate::config::SimulationConfig;
use crate::control_system::TrafficLightController;
use crate::monitoring::phase_log::show_phase_log;
use crate::monitoring::plotting::{plot_inference, plot_membership_functions};
use crate::simulation_engine::simulation::{ctrl_c_shutdown, run_simulation};
use std::error::Error;
use std::io::{stdin, stdout, Write};

/// The five showcase inputs: (density, wait, description).
pub const TEST_CASES: [(f64, f64, &str); 5] = [
    (20.0, 25.0, "Low density, short wait"),
    (50.0, 60.0, "Medium density, medium wait"),
    (85.0, 95.0, "High density, long wait"),
    (30.0, 80.0, "Low-medium density, long wait"),
    (70.0, 40.0, "High density, medium wait"),
];

// None on EOF or read failure.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    stdout().flush().ok()?;
    let mut input = String::new();
    match stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn show_menu() {
    println!("\n{}", "=".repeat(60));
    println!("  FUZZY LOGIC TRAFFIC LIGHT CONTROL SYSTEM");
    println!("{}", "=".repeat(60));
    println!("\n1. Run Traffic Simulation");
    println!("2. Visualize Fuzzy Membership Functions");
    println!("3. Test Fuzzy Inference (Custom Inputs)");
    println!("4. Run All Visualizations");
    println!("5. Show Phase Log");
    println!("6. Exit");
    println!("\n{}", "=".repeat(60));
}

/// Runs the headless simulation until Ctrl-C or `max_ticks`.
pub async fn run_simulation_from_menu(config: &SimulationConfig) -> Result<(), Box<dyn Error>> {
    println!("\nStarting traffic simulation...");
    println!("Random spawn rates will be generated for each direction");
    println!("Press Ctrl-C to return to menu\n");
    let summary = run_simulation(config.clone(), ctrl_c_shutdown()).await?;
    println!(
        "Ran {} ticks: {} vehicles spawned, {} exited, {} phase changes",
        summary.ticks, summary.vehicles_spawned, summary.vehicles_exited, summary.phase_changes
    );
    if let Some(mean) = summary.mean_green {
        println!("Mean green duration: {:.1}s", mean);
    }
    Ok(())
}

pub fn visualize_membership_functions() -> Result<(), Box<dyn Error>> {
    println!("\nGenerating membership function visualizations...");
    let controller = TrafficLightController::new("demo")?;
    plot_membership_functions(controller.engine(), "membership_functions.png")?;
    println!("Saved membership_functions.png");
    Ok(())
}

pub fn print_test_cases(controller: &TrafficLightController) {
    println!("\nRunning predefined test cases:\n");
    for (density, wait, description) in TEST_CASES {
        let green = controller.compute_green_time(density, wait).seconds();
        println!("  {}", description);
        println!("  -> Input: Density={}%, Wait={}s", density, wait);
        println!("  -> Output: Green Light={}s\n", green);
    }
}

pub fn test_fuzzy_inference() -> Result<(), Box<dyn Error>> {
    println!("\n{}", "-".repeat(60));
    println!("  FUZZY INFERENCE TESTING");
    println!("{}", "-".repeat(60));

    let controller = TrafficLightController::new("test")?;
    print_test_cases(&controller);

    println!("\nInteractive Testing (enter 'q' to quit)");
    println!("{}", "-".repeat(60));

    let mut plots = 0;
    loop {
        let Some(density_input) = prompt("\nEnter traffic density (0-100) or 'q' to quit: ") else {
            break;
        };
        if density_input.eq_ignore_ascii_case("q") {
            break;
        }
        let Some(wait_input) = prompt("Enter average wait time (0-120 seconds): ") else {
            break;
        };

        let (density, wait) = match (density_input.parse::<f64>(), wait_input.parse::<f64>()) {
            (Ok(d), Ok(w)) => (d, w),
            _ => {
                println!("Invalid input! Please enter numeric values.");
                continue;
            }
        };
        if !(0.0..=100.0).contains(&density) {
            println!("Density must be between 0 and 100!");
            continue;
        }
        if !(0.0..=120.0).contains(&wait) {
            println!("Wait time must be between 0 and 120 seconds!");
            continue;
        }

        let green = controller.compute_green_time(density, wait).seconds();
        println!("\n  RESULT:");
        println!("  Input: Density={}%, Wait={}s", density, wait);
        println!("  Output: Green Light Duration={}s", green);

        let visualize = prompt("\nVisualize this inference? (y/n): ").unwrap_or_default();
        if visualize.eq_ignore_ascii_case("y") {
            plots += 1;
            let file = format!("inference_custom_{}.png", plots);
            match plot_inference(&controller, density, wait, &file) {
                Ok(()) => println!("Saved {}", file),
                Err(e) => eprintln!("Error plotting inference: {}", e),
            }
        }
    }
    Ok(())
}

pub fn run_all_visualizations() -> Result<(), Box<dyn Error>> {
    println!("\nGenerating all visualizations...");
    let controller = TrafficLightController::new("demo")?;

    println!("\n1. Generating membership functions...");
    plot_membership_functions(controller.engine(), "membership_functions.png")?;

    println!("2. Generating inference examples...");
    for (i, (density, wait, description)) in TEST_CASES.iter().take(3).enumerate() {
        println!("   - {}", description);
        let file = format!("inference_example_{}.png", i + 1);
        plot_inference(&controller, *density, *wait, &file)?;
        let green = controller.compute_green_time(*density, *wait).seconds();
        println!("     Result: {}s green time", green);
    }

    println!("\nAll visualizations complete!");
    println!("Files saved to current directory");
    Ok(())
}

/// Interactive menu around the simulation, the charts and the controller.
pub async fn run_cli(config: SimulationConfig) {
    loop {
        show_menu();
        let Some(choice) = prompt("\nEnter your choice (1-6): ") else {
            println!("\nExiting... Goodbye!");
            break;
        };
        let result = match choice.as_str() {
            "1" => run_simulation_from_menu(&config).await,
            "2" => visualize_membership_functions(),
            "3" => test_fuzzy_inference(),
            "4" => run_all_visualizations(),
            "5" => match &config.phase_log_path {
                Some(path) => show_phase_log(path),
                None => {
                    println!("No phase_log_path configured.");
                    Ok(())
                }
            },
            "6" => {
                println!("\nExiting... Goodbye!");
                break;
            }
            _ => {
                println!("\nInvalid choice! Please enter 1-6.");
                Ok(())
            }
        };
        if let Err(e) = result {
            eprintln!("\nError: {}", e);
        }
    }
}
