//! AllReduce algorithm engine.
//!
//! Every strategy turns a torus and a vector size into a step schedule and a
//! cost estimate under the shared [`LinkCostModel`]. The set of strategies is
//! closed: [`Algorithm`] enumerates them and dispatches by `match`.
//!
//! Cost aggregation intentionally differs between strategies. Swing,
//! Recursive Doubling and Bucket price a step once from a representative
//! distance; Ring prices it as the slowest of its concurrent transfers.

pub mod types;
pub mod cost;
pub mod stats;
pub mod swing;
pub mod recursive_doubling;
pub mod ring;
pub mod bucket;

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::topology::TorusTopology;

pub use cost::{goodput_gbps, LinkCostModel};
pub use stats::StatisticsAggregator;
pub use types::{AlgorithmClass, Statistics, Step, Variant};

/// The AllReduce strategies under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Swing(Variant),
    RecursiveDoubling(Variant),
    Ring,
    Bucket,
}

/// Unknown algorithm key
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown algorithm '{0}' (expected one of: swing-bw, swing-lat, rd-bw, rd-lat, ring, bucket)")]
pub struct AlgorithmParseError(pub String);

impl Algorithm {
    /// Every algorithm, in reporting order
    pub fn all() -> Vec<Algorithm> {
        vec![
            Algorithm::Swing(Variant::BandwidthOptimal),
            Algorithm::Swing(Variant::LatencyOptimal),
            Algorithm::RecursiveDoubling(Variant::BandwidthOptimal),
            Algorithm::RecursiveDoubling(Variant::LatencyOptimal),
            Algorithm::Ring,
            Algorithm::Bucket,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Swing(Variant::BandwidthOptimal) => "Swing (Bandwidth-Optimal)",
            Algorithm::Swing(Variant::LatencyOptimal) => "Swing (Latency-Optimal)",
            Algorithm::RecursiveDoubling(Variant::BandwidthOptimal) => {
                "Recursive Doubling (Bandwidth-Optimal)"
            }
            Algorithm::RecursiveDoubling(Variant::LatencyOptimal) => {
                "Recursive Doubling (Latency-Optimal)"
            }
            Algorithm::Ring => "Ring Algorithm",
            Algorithm::Bucket => "Bucket Algorithm (Torus)",
        }
    }

    /// Short key accepted by [`FromStr`]
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Swing(Variant::BandwidthOptimal) => "swing-bw",
            Algorithm::Swing(Variant::LatencyOptimal) => "swing-lat",
            Algorithm::RecursiveDoubling(Variant::BandwidthOptimal) => "rd-bw",
            Algorithm::RecursiveDoubling(Variant::LatencyOptimal) => "rd-lat",
            Algorithm::Ring => "ring",
            Algorithm::Bucket => "bucket",
        }
    }

    pub fn class(&self) -> AlgorithmClass {
        match self {
            Algorithm::Swing(variant) | Algorithm::RecursiveDoubling(variant) => (*variant).into(),
            Algorithm::Ring | Algorithm::Bucket => AlgorithmClass::BandwidthOptimal,
        }
    }

    /// Evaluate this algorithm on `topology` for a vector of `vector_size_bytes`.
    ///
    /// Deterministic; returns an empty [`Statistics`] when the torus has
    /// fewer than two nodes.
    pub fn execute(&self, topology: &TorusTopology, vector_size_bytes: u64) -> Statistics {
        let stats = match self {
            Algorithm::Swing(variant) => swing::execute(*variant, topology, vector_size_bytes),
            Algorithm::RecursiveDoubling(variant) => {
                recursive_doubling::execute(*variant, topology, vector_size_bytes)
            }
            Algorithm::Ring => ring::execute(topology, vector_size_bytes),
            Algorithm::Bucket => bucket::execute(topology, vector_size_bytes),
        };
        debug!(
            "{} @ {} bytes: {} steps, {:.2} us, {:.2} Gb/s",
            self.name(),
            vector_size_bytes,
            stats.num_steps,
            stats.estimated_time_us,
            stats.goodput_gbps
        );
        stats
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Algorithm::all()
            .into_iter()
            .find(|a| a.key() == key)
            .ok_or_else(|| AlgorithmParseError(s.to_string()))
    }
}

pub fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Exact log2 for powers of two, `floor(log2 n) + 1` otherwise
pub fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let floor = (usize::BITS - 1 - n.leading_zeros()) as usize;
    if is_power_of_two(n) {
        floor
    } else {
        floor + 1
    }
}

/// `vector_size / 2^(s+1)`, the payload of halving step `s`
pub(crate) fn halved(vector_size_bytes: u64, s: usize) -> u64 {
    u32::try_from(s + 1)
        .ok()
        .and_then(|shift| vector_size_bytes.checked_shr(shift))
        .unwrap_or(0)
}
