//! Predator-prey simulation engine.
//!
//! This crate implements the bounded 2D grid world where zebras and
//! lions age, move, hunt, and reproduce one tick at a time.

pub mod grid;
pub mod animal;
pub mod registry;
pub mod simulation;
pub mod runner;
pub mod snapshot;

pub use grid::Grid;
pub use animal::Animal;
pub use registry::Registry;
pub use simulation::Simulation;
pub use runner::Runner;
pub use snapshot::PopulationSnapshot;
