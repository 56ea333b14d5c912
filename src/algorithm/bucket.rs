//! Bucket AllReduce for tori.
//!
//! Reduce-Scatter runs a nearest-neighbor ring along dimension 0, then 1, and
//! so on, shrinking the held data by each extent before its ring. Allgather
//! replays the dimensions in reverse, growing the data back after each ring.
//! Every message crosses exactly one link.

use log::debug;

use crate::algorithm::cost::LinkCostModel;
use crate::algorithm::stats::StatisticsAggregator;
use crate::algorithm::types::Statistics;
use crate::topology::{Direction, TorusTopology};

/// Hop distance of every Bucket message
const NEIGHBOR_DISTANCE: u64 = 1;

pub fn execute(topology: &TorusTopology, vector_size_bytes: u64) -> Statistics {
    let p = topology.num_nodes();
    if p < 2 {
        return Statistics::default();
    }

    let cost = LinkCostModel::from_config(topology.config());
    let dims = topology.dimensions();
    let mut current_data_size = vector_size_bytes as f64;
    let mut agg = StatisticsAggregator::new();

    for (d, &extent) in dims.iter().enumerate() {
        if extent <= 1 {
            continue;
        }
        current_data_size /= extent as f64;
        let step_bytes = step_bytes(current_data_size);
        debug!("Bucket RS dimension {}: {} steps of {} bytes", d, extent - 1, step_bytes);

        for step in 0..extent - 1 {
            agg.record(
                format!("Bucket RS Dim {} Step {}", d, step),
                step_bytes,
                positive_neighbor_pairs(topology, d),
                cost.step_time_ns(step_bytes, NEIGHBOR_DISTANCE),
            );
        }
    }

    for (d, &extent) in dims.iter().enumerate().rev() {
        if extent <= 1 {
            continue;
        }
        let step_bytes = step_bytes(current_data_size);
        debug!("Bucket AG dimension {}: {} steps of {} bytes", d, extent - 1, step_bytes);

        for step in 0..extent - 1 {
            agg.record(
                format!("Bucket AG Dim {} Step {}", d, step),
                step_bytes,
                positive_neighbor_pairs(topology, d),
                cost.step_time_ns(step_bytes, NEIGHBOR_DISTANCE),
            );
        }
        current_data_size *= extent as f64;
    }

    agg.finish(vector_size_bytes)
}

fn step_bytes(current_data_size: f64) -> u64 {
    current_data_size.max(1.0) as u64
}

fn positive_neighbor_pairs(topology: &TorusTopology, dim: usize) -> Vec<(usize, usize)> {
    topology
        .nodes()
        .iter()
        .filter_map(|node| {
            node.neighbor(dim, Direction::Positive)
                .map(|dest| (node.id(), dest))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_count_sums_dimensions() {
        let torus = TorusTopology::from_dimensions(&[8, 4, 2]).unwrap();
        let stats = execute(&torus, 1 << 20);
        assert_eq!(stats.num_steps, 2 * (7 + 3 + 1));
    }

    #[test]
    fn test_payload_shrinks_then_grows() {
        let torus = TorusTopology::from_dimensions(&[8, 4]).unwrap();
        let stats = execute(&torus, 3200);
        let sizes: Vec<u64> = stats.steps.iter().map(|s| s.data_size_bytes).collect();

        // RS dim 0: 3200/8 = 400 (7 steps); RS dim 1: 400/4 = 100 (3 steps)
        // AG dim 1: 100 (3 steps); AG dim 0: 400 (7 steps)
        let mut expected = vec![400; 7];
        expected.extend(vec![100; 3]);
        expected.extend(vec![100; 3]);
        expected.extend(vec![400; 7]);
        assert_eq!(sizes, expected);
        assert_eq!(stats.steps[10].description, "Bucket AG Dim 1 Step 0");
    }

    #[test]
    fn test_messages_follow_positive_neighbors() {
        let torus = TorusTopology::from_dimensions(&[4, 3]).unwrap();
        let stats = execute(&torus, 1200);
        for step in &stats.steps {
            assert_eq!(step.communications.len(), 12);
            for &(src, dst) in &step.communications {
                assert_eq!(torus.distance(src, dst).unwrap(), 1);
            }
        }
        // Dimension 0 first: 3 -> 0 wraps
        assert!(stats.steps[0].communications.contains(&(3, 0)));
    }

    #[test]
    fn test_uniform_single_hop_cost() {
        let torus = TorusTopology::from_dimensions(&[4, 4]).unwrap();
        let cost = LinkCostModel::from_config(torus.config());
        let stats = execute(&torus, 1600);
        // RS: 3 x 400, 3 x 100; AG: 3 x 100, 3 x 400
        let expected_ns = 6.0 * cost.step_time_ns(400, 1) + 6.0 * cost.step_time_ns(100, 1);
        assert!((stats.estimated_time_us - expected_ns / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_vectors_clamp_to_one_byte() {
        let torus = TorusTopology::from_dimensions(&[8, 8]).unwrap();
        let stats = execute(&torus, 32);
        // 32 / 8 = 4, then 4 / 8 = 0.5 -> 1
        assert_eq!(stats.steps[0].data_size_bytes, 4);
        assert_eq!(stats.steps[7].data_size_bytes, 1);
    }
}
