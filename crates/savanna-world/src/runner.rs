//! Batch runner: repeated independent runs of the simulation.

use crate::simulation::Simulation;
use savanna_core::{CountMatrix, Reporter, Result, SimulationConfig, TickCounts};
use tracing::info;

/// Runs the configured number of independent simulations, each on a
/// freshly built grid with a freshly seeded population, and collects
/// the per-run, per-tick count matrix.
pub struct Runner {
    config: SimulationConfig,
}

impl Runner {
    /// Validates the configuration up front; a malformed config never
    /// starts a run.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Execute all runs and hand the finished matrix to `reporter`.
    pub fn run<R: Reporter>(&self, reporter: &mut R) -> Result<CountMatrix> {
        let mut matrix = CountMatrix::new();
        let duration = self.config.duration;
        let progress_interval = (duration / 5).max(1);

        for run in 0..self.config.repeats {
            let mut sim = Simulation::for_run(&self.config, run);
            let mut counts: Vec<TickCounts> = Vec::with_capacity(duration as usize);

            for tick in 0..duration {
                counts.push(sim.step()?);

                if tick % progress_interval == 0 {
                    let done = run * duration + tick;
                    let total = self.config.repeats * duration;
                    info!(
                        run,
                        tick,
                        percent = 100 * done / total,
                        "simulation progress"
                    );
                }
            }

            let last = counts.last().copied().unwrap_or_default();
            info!(
                run,
                zebras = last.zebras,
                lions = last.lions,
                "run complete"
            );
            matrix.push_run(counts);
        }

        reporter.report(&matrix);
        Ok(matrix)
    }
}
