//! Command-line entry point for the savanna simulation.
//!
//! Usage: `savanna [config.json] [--render]`
//!
//! With no config file the defaults apply (20x20 grid, 50 ticks,
//! 26 zebras, 10 lions, one run). `--render` replays the first run
//! and prints the final grid as ASCII.

mod render;
mod report;

use anyhow::{Context, Result};
use savanna_core::SimulationConfig;
use savanna_world::{Runner, Simulation};
use std::fs;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_config(path: &str) -> Result<SimulationConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file {path}"))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config file {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = SimulationConfig::default();
    let mut render_final = false;
    for arg in std::env::args().skip(1) {
        if arg == "--render" {
            render_final = true;
        } else {
            config = load_config(&arg)?;
        }
    }

    info!(
        grid_size = config.grid_size,
        duration = config.duration,
        repeats = config.repeats,
        zebras = config.initial_zebras,
        lions = config.initial_lions,
        seed = config.seed,
        "starting simulation"
    );

    let start = Instant::now();
    let runner = Runner::new(config.clone())?;
    let mut reporter = report::ConsoleReporter::default();
    runner.run(&mut reporter)?;
    info!(elapsed = ?start.elapsed(), "simulation complete");

    if render_final {
        let mut sim = Simulation::for_run(&config, 0);
        for _ in 0..config.duration {
            sim.step()?;
        }
        println!("{}", render::render(&sim.snapshot()));
    }

    Ok(())
}
