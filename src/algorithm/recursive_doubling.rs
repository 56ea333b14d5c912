//! Recursive Doubling AllReduce.
//!
//! Step `s` pairs ranks that differ in bit `s` (`r XOR 2^s`). Pairing is pure
//! rank arithmetic, independent of torus coordinates, and the hop multiplier
//! is `2^s`. When the node count is not a power of two, ranks whose partner
//! falls outside `[0, P)` sit the step out.

use log::{debug, warn};

use crate::algorithm::cost::LinkCostModel;
use crate::algorithm::stats::StatisticsAggregator;
use crate::algorithm::types::{Statistics, Variant};
use crate::algorithm::{ceil_log2, halved, is_power_of_two};
use crate::topology::TorusTopology;

/// XOR partner of `r` at step `s`, `None` if it does not exist among `p` ranks
pub fn peer(r: usize, s: usize, p: usize) -> Option<usize> {
    let mask = 1usize.checked_shl(s as u32)?;
    Some(r ^ mask).filter(|&partner| partner < p)
}

/// Hop multiplier of step `s`
pub fn distance(s: usize) -> u64 {
    1u64.checked_shl(s as u32).unwrap_or(u64::MAX)
}

pub fn execute(variant: Variant, topology: &TorusTopology, vector_size_bytes: u64) -> Statistics {
    let p = topology.num_nodes();
    if p < 2 {
        return Statistics::default();
    }
    if !is_power_of_two(p) {
        warn!(
            "Recursive Doubling on {} ranks: ranks without an XOR partner are excluded from their steps",
            p
        );
    }

    let cost = LinkCostModel::from_config(topology.config());
    let num_steps = ceil_log2(p);
    let mut agg = StatisticsAggregator::new();

    debug!("Recursive Doubling {:?}: {} ranks, {} steps per phase", variant, p, num_steps);

    match variant {
        Variant::BandwidthOptimal => {
            for s in 0..num_steps {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    s,
                    halved(vector_size_bytes, s),
                    format!("RD Reduce-Scatter step {}", s),
                );
            }
            for s in (0..num_steps).rev() {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    s,
                    halved(vector_size_bytes, s),
                    format!("RD Allgather step {}", s),
                );
            }
        }
        Variant::LatencyOptimal => {
            for s in 0..num_steps {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    s,
                    vector_size_bytes,
                    format!("RD Latency-Optimal step {}", s),
                );
            }
        }
    }

    agg.finish(vector_size_bytes)
}

fn record_step(
    agg: &mut StatisticsAggregator,
    cost: &LinkCostModel,
    p: usize,
    s: usize,
    bytes: u64,
    description: String,
) {
    let communications = (0..p)
        .filter_map(|r| peer(r, s, p).map(|partner| (r, partner)))
        .collect();
    agg.record(description, bytes, communications, cost.step_time_ns(bytes, distance(s)));
}
