//! Swing AllReduce.
//!
//! At step `s` every rank talks to `π(r, s)`, reached through a signed
//! power-of-two offset `ρ(s) = Σ_{i=0..=s} (-2)^i`: even ranks move forward by
//! `ρ(s)`, odd ranks backward. Peers are computed in rank space; the torus
//! dimension a step would map to (`s % D`) is not used for peer selection.
//! Only the per-dimension step index `σ = s / D` feeds the cost, through the
//! hop multiplier `δ(σ) = |ρ(σ)|`.

use log::debug;

use crate::algorithm::cost::LinkCostModel;
use crate::algorithm::stats::StatisticsAggregator;
use crate::algorithm::types::{Statistics, Variant};
use crate::algorithm::{ceil_log2, halved};
use crate::topology::TorusTopology;

/// `ρ(s)`, accumulated term by term
pub fn rho(s: usize) -> i128 {
    let mut result: i128 = 0;
    let mut term: i128 = 1;
    for _ in 0..=s {
        result += term;
        term *= -2;
    }
    result
}

/// `δ(s) = |ρ(s)|`
pub fn delta(s: usize) -> u64 {
    rho(s).unsigned_abs() as u64
}

/// Communication peer of rank `r` at step `s` among `p` ranks
pub fn peer(r: usize, s: usize, p: usize) -> usize {
    let rho_s = rho(s);
    let shifted = if r % 2 == 0 {
        r as i128 + rho_s
    } else {
        r as i128 - rho_s
    };
    shifted.rem_euclid(p as i128) as usize
}

pub fn execute(variant: Variant, topology: &TorusTopology, vector_size_bytes: u64) -> Statistics {
    let p = topology.num_nodes();
    if p < 2 {
        return Statistics::default();
    }

    let cost = LinkCostModel::from_config(topology.config());
    let dims = topology.num_dimensions().max(1);
    let num_steps = ceil_log2(p);
    let mut agg = StatisticsAggregator::new();

    debug!("Swing {:?}: {} ranks, {} steps per phase", variant, p, num_steps);

    match variant {
        Variant::BandwidthOptimal => {
            for s in 0..num_steps {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    dims,
                    s,
                    halved(vector_size_bytes, s),
                    format!("Swing Reduce-Scatter step {}", s),
                );
            }
            // Allgather retraces the Reduce-Scatter peers in reverse.
            for s in (0..num_steps).rev() {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    dims,
                    s,
                    halved(vector_size_bytes, s),
                    format!("Swing Allgather step {}", s),
                );
            }
        }
        Variant::LatencyOptimal => {
            for s in 0..num_steps {
                record_step(
                    &mut agg,
                    &cost,
                    p,
                    dims,
                    s,
                    vector_size_bytes,
                    format!("Swing Latency-Optimal step {}", s),
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
    dims: usize,
    s: usize,
    bytes: u64,
    description: String,
) {
    let communications = (0..p).map(|r| (r, peer(r, s, p))).collect();
    let sigma = s / dims;
    agg.record(description, bytes, communications, cost.step_time_ns(bytes, delta(sigma)));
}
