//! Algorithm type definitions.
//!
//! Step records, per-run statistics and the variant/classification tags shared
//! by every AllReduce strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the latency/bandwidth trade-off a variant targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Reduce-Scatter followed by Allgather, payload halves per step
    BandwidthOptimal,
    /// Full-vector exchange every step
    LatencyOptimal,
}

/// Reporting classification of an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmClass {
    LatencyOptimal,
    BandwidthOptimal,
    BandwidthOptimized,
}

impl fmt::Display for AlgorithmClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatencyOptimal => write!(f, "latency-optimal"),
            Self::BandwidthOptimal => write!(f, "bandwidth-optimal"),
            Self::BandwidthOptimized => write!(f, "bandwidth-optimized"),
        }
    }
}

impl From<Variant> for AlgorithmClass {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::BandwidthOptimal => Self::BandwidthOptimal,
            Variant::LatencyOptimal => Self::LatencyOptimal,
        }
    }
}

/// One synchronous communication step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: usize,
    /// Active `(source, destination)` rank pairs
    pub communications: Vec<(usize, usize)>,
    /// Payload of every message in this step
    pub data_size_bytes: u64,
    pub description: String,
}

/// Summary of one (algorithm, vector size) evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub num_steps: usize,
    /// Sum of payload bytes over every message of every step
    pub total_bytes_sent: u64,
    pub estimated_time_us: f64,
    pub goodput_gbps: f64,
    /// Step trace, kept out of serialized reports
    #[serde(skip_serializing, default)]
    pub steps: Vec<Step>,
}

impl Statistics {
    /// True for the all-zero result returned on degenerate inputs
    pub fn is_empty(&self) -> bool {
        self.num_steps == 0 && self.total_bytes_sent == 0 && self.steps.is_empty()
    }
}
