//! Per-tick population counts and cross-run aggregation.

use serde::{Deserialize, Serialize};

/// Alive population per species at one tick boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounts {
    pub zebras: u32,
    pub lions: u32,
}

impl TickCounts {
    pub fn new(zebras: u32, lions: u32) -> Self {
        Self { zebras, lions }
    }
}

/// Per-species count averaged across runs, one entry per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickAverages {
    pub zebras: f64,
    pub lions: f64,
}

/// The `repeats x duration` matrix of per-tick species counts
/// produced by a batch of independent runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMatrix {
    runs: Vec<Vec<TickCounts>>,
}

impl CountMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed run's per-tick counts.
    pub fn push_run(&mut self, counts: Vec<TickCounts>) {
        self.runs.push(counts);
    }

    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// Ticks per run; zero for an empty matrix.
    pub fn duration(&self) -> usize {
        self.runs.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn runs(&self) -> &[Vec<TickCounts>] {
        &self.runs
    }

    /// Mean zebra and lion count per tick across all runs.
    pub fn averages(&self) -> Vec<TickAverages> {
        let n = self.runs.len();
        if n == 0 {
            return Vec::new();
        }

        let duration = self.duration();
        let mut averages = vec![TickAverages::default(); duration];

        for run in &self.runs {
            for (tick, counts) in run.iter().enumerate() {
                averages[tick].zebras += counts.zebras as f64;
                averages[tick].lions += counts.lions as f64;
            }
        }

        for avg in &mut averages {
            avg.zebras /= n as f64;
            avg.lions /= n as f64;
        }

        averages
    }
}

/// External collaborator that consumes the finished count matrix,
/// e.g. for aggregation or plotting.
pub trait Reporter {
    fn report(&mut self, matrix: &CountMatrix);
}

/// Reporter that discards the matrix.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _matrix: &CountMatrix) {}
}
