// simulation_main.rs
use fuzzy_traffic::config::SimulationConfig;
use fuzzy_traffic::simulation_engine::simulation::{ctrl_c_shutdown, run_simulation};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    let summary = run_simulation(config, ctrl_c_shutdown()).await?;

    println!("Ticks run:         {}", summary.ticks);
    println!("Vehicles spawned:  {}", summary.vehicles_spawned);
    println!("Vehicles exited:   {}", summary.vehicles_exited);
    println!("Phase changes:     {}", summary.phase_changes);
    match summary.mean_green {
        Some(mean) => println!("Mean green:        {:.1}s", mean),
        None => println!("Mean green:        n/a"),
    }
    Ok(())
}
