//! Torus topology module.
//!
//! This module contains the torus addressing model (rank/coordinate
//! conversion, wraparound neighbors, minimal distance) and the derived
//! diagnostics reported by the binaries.

pub mod types;
pub mod torus;
pub mod summary;

// Re-export key types for easier access
pub use types::{Coordinate, Direction, Node, TopologyError, TorusConfig};
pub use torus::TorusTopology;
pub use summary::TopologySummary;
