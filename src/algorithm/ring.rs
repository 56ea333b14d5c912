//! Ring AllReduce.
//!
//! The vector is split into P chunks and every rank forwards one chunk to its
//! logical successor `(r + 1) mod P` for P-1 Reduce-Scatter steps and P-1
//! Allgather steps. The logical successor is not necessarily a physical
//! neighbor, so each step costs as much as the slowest rank's transfer over
//! its true torus distance.

use log::debug;

use crate::algorithm::cost::LinkCostModel;
use crate::algorithm::stats::StatisticsAggregator;
use crate::algorithm::types::Statistics;
use crate::topology::TorusTopology;

pub fn execute(topology: &TorusTopology, vector_size_bytes: u64) -> Statistics {
    let p = topology.num_nodes();
    if p < 2 {
        return Statistics::default();
    }

    let cost = LinkCostModel::from_config(topology.config());
    let chunk_size = (vector_size_bytes / p as u64).max(1);

    // The pairing never changes, so neither does the slowest transfer.
    let nodes = topology.nodes();
    let step_time_ns = nodes
        .iter()
        .map(|node| {
            let dest = &nodes[(node.id() + 1) % p];
            cost.step_time_ns(chunk_size, topology.node_distance(node, dest) as u64)
        })
        .fold(0.0_f64, f64::max);

    debug!(
        "Ring: {} ranks, chunk {} bytes, {:.3} ns per step",
        p, chunk_size, step_time_ns
    );

    let mut agg = StatisticsAggregator::new();
    for phase in ["Reduce-Scatter", "Allgather"] {
        for step in 0..p - 1 {
            agg.record(
                format!("Ring {} Step {}", phase, step),
                chunk_size,
                successor_pairs(p),
                step_time_ns,
            );
        }
    }

    agg.finish(vector_size_bytes)
}

fn successor_pairs(p: usize) -> Vec<(usize, usize)> {
    (0..p).map(|r| (r, (r + 1) % p)).collect()
}
