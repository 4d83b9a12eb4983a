//! Read-only population view for external renderers.

use crate::registry::Registry;
use savanna_core::{Position, Species};
use serde::{Deserialize, Serialize};

/// Ordered list of (species, position) for all currently alive
/// animals, captured at a tick boundary. Never part of the engine's
/// mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub grid_size: i32,
    pub animals: Vec<(Species, Position)>,
}

impl PopulationSnapshot {
    pub(crate) fn capture(grid_size: i32, registry: &Registry) -> Self {
        let mut animals: Vec<(Species, Position)> = registry
            .iter()
            .filter(|a| a.alive)
            .filter_map(|a| a.cell.map(|pos| (a.species, pos)))
            .collect();
        animals.sort_by_key(|&(_, pos)| pos);

        Self { grid_size, animals }
    }

    /// First species occupying `pos`, if any.
    pub fn species_at(&self, pos: Position) -> Option<Species> {
        self.animals
            .iter()
            .find(|&&(_, p)| p == pos)
            .map(|&(species, _)| species)
    }
}
