//! Torus type definitions.
//!
//! This file contains the configuration, node and error types shared by the
//! torus topology and everything that consumes it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default per-link bandwidth in Gb/s
pub const DEFAULT_LINK_BANDWIDTH_GBPS: f64 = 400.0;
/// Default per-link latency in nanoseconds
pub const DEFAULT_LINK_LATENCY_NS: f64 = 100.0;
/// Default latency added per traversed hop in nanoseconds
pub const DEFAULT_HOP_LATENCY_NS: f64 = 300.0;

/// Multi-dimensional coordinate of a node, one entry per torus dimension
pub type Coordinate = Vec<usize>;

/// Errors raised while building or querying a torus
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("Invalid torus configuration: {0}")]
    InvalidConfig(String),
    #[error("Rank {rank} is out of range for a torus of {total} nodes")]
    OutOfRange { rank: usize, total: usize },
    #[error("Dimension {dim} is out of range for a {dims}-dimensional torus")]
    DimensionOutOfRange { dim: usize, dims: usize },
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Torus shape and link parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorusConfig {
    /// Extent of every dimension, dimension 0 first
    pub dimensions: Vec<usize>,
    #[serde(default = "default_link_bandwidth_gbps")]
    pub link_bandwidth_gbps: f64,
    #[serde(default = "default_link_latency_ns")]
    pub link_latency_ns: f64,
    #[serde(default = "default_hop_latency_ns")]
    pub hop_latency_ns: f64,
}

fn default_link_bandwidth_gbps() -> f64 {
    DEFAULT_LINK_BANDWIDTH_GBPS
}

fn default_link_latency_ns() -> f64 {
    DEFAULT_LINK_LATENCY_NS
}

fn default_hop_latency_ns() -> f64 {
    DEFAULT_HOP_LATENCY_NS
}

impl TorusConfig {
    /// Build a configuration with the default link parameters
    pub fn with_dimensions(dimensions: Vec<usize>) -> Self {
        Self {
            dimensions,
            link_bandwidth_gbps: DEFAULT_LINK_BANDWIDTH_GBPS,
            link_latency_ns: DEFAULT_LINK_LATENCY_NS,
            hop_latency_ns: DEFAULT_HOP_LATENCY_NS,
        }
    }

    /// Number of torus dimensions (D)
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// Total node count (P), `None` if the product overflows
    pub fn total_nodes(&self) -> Option<usize> {
        self.dimensions
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
    }

    /// True if every dimension has the same extent
    pub fn is_square(&self) -> bool {
        match self.dimensions.first() {
            Some(first) => self.dimensions.iter().all(|d| d == first),
            None => false,
        }
    }

    /// True if every extent is a power of two
    pub fn all_dimensions_power_of_two(&self) -> bool {
        self.dimensions.iter().all(|d| d.is_power_of_two())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Ok(total_nodes)` if the torus can be built
    /// * `Err(TopologyError::InvalidConfig)` describing the first problem found
    pub fn validate(&self) -> Result<usize, TopologyError> {
        if self.dimensions.is_empty() {
            return Err(TopologyError::InvalidConfig(
                "torus must have at least 1 dimension".to_string(),
            ));
        }

        for (i, &extent) in self.dimensions.iter().enumerate() {
            if extent < 2 {
                return Err(TopologyError::InvalidConfig(format!(
                    "dimension {} must be at least 2 (got {})",
                    i, extent
                )));
            }
        }

        if !self.link_bandwidth_gbps.is_finite() || self.link_bandwidth_gbps <= 0.0 {
            return Err(TopologyError::InvalidConfig(format!(
                "link bandwidth must be positive (got {} Gb/s)",
                self.link_bandwidth_gbps
            )));
        }
        if !self.link_latency_ns.is_finite() || self.link_latency_ns < 0.0 {
            return Err(TopologyError::InvalidConfig(format!(
                "link latency cannot be negative (got {} ns)",
                self.link_latency_ns
            )));
        }
        if !self.hop_latency_ns.is_finite() || self.hop_latency_ns < 0.0 {
            return Err(TopologyError::InvalidConfig(format!(
                "hop latency cannot be negative (got {} ns)",
                self.hop_latency_ns
            )));
        }

        self.total_nodes().ok_or_else(|| {
            TopologyError::InvalidConfig(format!(
                "node count of {:?} overflows the rank space",
                self.dimensions
            ))
        })
    }
}

/// Direction along a torus dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    /// Slot order of the two neighbors along each dimension
    pub const ALL: [Direction; 2] = [Direction::Negative, Direction::Positive];

    /// Signed coordinate offset of one hop in this direction
    pub fn offset(self) -> isize {
        match self {
            Self::Negative => -1,
            Self::Positive => 1,
        }
    }
}

/// A torus node.
///
/// Neighbors are stored as plain ranks in slot order
/// `(dim0-, dim0+, dim1-, dim1+, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    coordinates: Coordinate,
    neighbors: Vec<usize>,
}

impl Node {
    pub(crate) fn new(id: usize, coordinates: Coordinate, neighbors: Vec<usize>) -> Self {
        Self {
            id,
            coordinates,
            neighbors,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn coordinates(&self) -> &[usize] {
        &self.coordinates
    }

    /// All 2·D neighbor slots
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Neighbor along `dimension` in the given direction, `None` if the
    /// dimension does not exist
    pub fn neighbor(&self, dimension: usize, direction: Direction) -> Option<usize> {
        let slot = dimension * 2 + usize::from(direction.offset() > 0);
        self.neighbors.get(slot).copied()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords: Vec<String> = self.coordinates.iter().map(|c| c.to_string()).collect();
        write!(f, "Node {} [{}]", self.id, coords.join(","))
    }
}
