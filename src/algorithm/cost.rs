//! Link cost model.
//!
//! `step_time = link_latency + bytes / bandwidth + distance * hop_latency`,
//! all in nanoseconds. Shared by every strategy so their results stay
//! comparable.

use crate::topology::TorusConfig;

const NS_PER_US: f64 = 1_000.0;

/// Link parameters in the units the formulas consume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCostModel {
    pub link_bandwidth_gbps: f64,
    pub link_latency_ns: f64,
    pub hop_latency_ns: f64,
}

impl LinkCostModel {
    pub fn from_config(config: &TorusConfig) -> Self {
        Self {
            link_bandwidth_gbps: config.link_bandwidth_gbps,
            link_latency_ns: config.link_latency_ns,
            hop_latency_ns: config.hop_latency_ns,
        }
    }

    /// Gb/s converted to bytes per nanosecond
    pub fn bytes_per_ns(&self) -> f64 {
        (self.link_bandwidth_gbps * 1e9 / 8.0) / 1e9
    }

    pub fn transfer_time_ns(&self, bytes: u64) -> f64 {
        bytes as f64 / self.bytes_per_ns()
    }

    /// Time for one message of `bytes` travelling `distance` hops
    pub fn step_time_ns(&self, bytes: u64, distance: u64) -> f64 {
        self.link_latency_ns + self.transfer_time_ns(bytes) + distance as f64 * self.hop_latency_ns
    }
}

pub fn ns_to_us(ns: f64) -> f64 {
    ns / NS_PER_US
}

/// Effective throughput in Gb/s; zero when no time elapsed
pub fn goodput_gbps(vector_size_bytes: u64, estimated_time_us: f64) -> f64 {
    let time_s = estimated_time_us / 1e6;
    if time_s > 0.0 {
        let data_gb = (vector_size_bytes as f64 * 8.0) / 1e9;
        data_gb / time_s
    } else {
        0.0
    }
}
