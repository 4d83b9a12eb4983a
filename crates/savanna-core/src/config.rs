//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Side length of the square grid
    pub grid_size: i32,
    /// Number of ticks per run
    pub duration: u32,
    /// Number of independent runs to repeat
    pub repeats: u32,
    /// Initial zebra population per run
    pub initial_zebras: u32,
    /// Initial lion population per run
    pub initial_lions: u32,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            duration: 50,
            repeats: 1,
            initial_zebras: 26,
            initial_lions: 10,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Reject malformed configurations before any run starts.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(Error::Config(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.duration == 0 {
            return Err(Error::Config("duration must be at least 1 tick".to_string()));
        }
        if self.repeats == 0 {
            return Err(Error::Config("repeats must be at least 1".to_string()));
        }
        let capacity = (self.grid_size as u64) * (self.grid_size as u64);
        let population = self.initial_zebras as u64 + self.initial_lions as u64;
        if population > capacity {
            return Err(Error::Config(format!(
                "initial population {} exceeds grid capacity {} ({}x{})",
                population, capacity, self.grid_size, self.grid_size
            )));
        }
        Ok(())
    }
}
