//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimalId(pub Uuid);

impl AnimalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnimalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D grid position. The derived ordering (row first, then column) is
/// the left-to-right, top-to-bottom traversal order the tick pipeline
/// sorts by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance to another position
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// True if the position lies on a `grid_size` x `grid_size` grid
    pub fn in_bounds(&self, grid_size: i32) -> bool {
        self.row >= 0 && self.row < grid_size && self.col >= 0 && self.col < grid_size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Species tag for an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Zebra,
    Lion,
}

/// Per-species life-history constants
#[derive(Debug, Clone, Copy)]
pub struct SpeciesParams {
    /// Inclusive range the per-instance maximum age is drawn from
    pub max_age_range: (u32, u32),
    /// Inclusive range the per-instance reproduction period is drawn from
    pub reproduction_range: (u32, u32),
    /// Ticks without a meal before starving, if the species starves at all
    pub hunger_limit: Option<u32>,
}

impl Species {
    pub fn params(&self) -> SpeciesParams {
        match self {
            Species::Zebra => SpeciesParams {
                max_age_range: (8, 10),
                reproduction_range: (3, 4),
                hunger_limit: None,
            },
            Species::Lion => SpeciesParams {
                max_age_range: (16, 22),
                reproduction_range: (6, 8),
                hunger_limit: Some(6),
            },
        }
    }

    /// Predation is one-directional and species-fixed: lion eats zebra.
    pub fn preys_on(&self, other: Species) -> bool {
        matches!((self, other), (Species::Lion, Species::Zebra))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Zebra => write!(f, "Zebra"),
            Species::Lion => write!(f, "Lion"),
        }
    }
}
