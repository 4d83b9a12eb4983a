//! Core types and utilities for the savanna predator-prey simulation.

pub mod types;
pub mod config;
pub mod counts;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use counts::*;
