// main.rs
use fuzzy_traffic::config::SimulationConfig;
use fuzzy_traffic::monitoring::cli::run_cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    run_cli(config).await;
    Ok(())
}
