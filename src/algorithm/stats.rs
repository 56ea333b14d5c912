//! Statistics aggregation.
//!
//! Strategies hand each finished step to the aggregator together with the
//! wall-clock cost they computed for it; the aggregator owns the running
//! totals and derives goodput once at the end.

use log::debug;

use crate::algorithm::cost::{goodput_gbps, ns_to_us};
use crate::algorithm::types::{Statistics, Step};

#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    stats: Statistics,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Every pair in `communications` sends `data_size_bytes`.
    pub fn record(
        &mut self,
        description: String,
        data_size_bytes: u64,
        communications: Vec<(usize, usize)>,
        step_time_ns: f64,
    ) {
        let step_number = self.stats.steps.len();
        debug!(
            "step {} ({}): {} messages of {} bytes, {:.3} ns",
            step_number,
            description,
            communications.len(),
            data_size_bytes,
            step_time_ns
        );

        // Saturates instead of wrapping on absurd vector sizes.
        let step_bytes = (communications.len() as u64).saturating_mul(data_size_bytes);
        self.stats.total_bytes_sent = self.stats.total_bytes_sent.saturating_add(step_bytes);
        self.stats.estimated_time_us += ns_to_us(step_time_ns);
        self.stats.num_steps += 1;
        self.stats.steps.push(Step {
            step_number,
            communications,
            data_size_bytes,
            description,
        });
    }

    /// Close the run and derive goodput for the original vector size
    pub fn finish(mut self, vector_size_bytes: u64) -> Statistics {
        self.stats.goodput_gbps = goodput_gbps(vector_size_bytes, self.stats.estimated_time_us);
        self.stats
    }
}
