//! Topology diagnostics.
//!
//! Derived metrics and text renderings used by both binaries: the summary
//! block, sampled distance statistics, sample node listings and the distance
//! matrix.

use serde::{Deserialize, Serialize};

use crate::topology::torus::TorusTopology;

/// Pairs are sampled among the first this many nodes
const DISTANCE_SAMPLE_NODES: usize = 100;

/// Static description of a torus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub dimensions: Vec<usize>,
    pub num_dimensions: usize,
    pub total_nodes: usize,
    pub ports_per_node: usize,
    pub is_square: bool,
    pub all_power_of_two: bool,
    /// Largest minimal distance between two nodes
    pub diameter: usize,
    pub node_degree: usize,
    pub total_links: usize,
    /// Mean distance over node pairs sampled from the first 100 nodes
    pub avg_distance_sampled: Option<f64>,
    /// Only reported for square 2-D tori
    pub bisection_width: Option<usize>,
    pub link_bandwidth_gbps: f64,
    pub link_latency_ns: f64,
    pub hop_latency_ns: f64,
}

impl TopologySummary {
    pub fn from_topology(topology: &TorusTopology) -> Self {
        let config = topology.config();
        let dims = topology.dimensions();
        let node_degree = topology.nodes().first().map_or(0, |n| n.neighbors().len());

        Self {
            dimensions: dims.to_vec(),
            num_dimensions: dims.len(),
            total_nodes: topology.num_nodes(),
            ports_per_node: 2 * dims.len(),
            is_square: config.is_square(),
            all_power_of_two: config.all_dimensions_power_of_two(),
            diameter: dims.iter().map(|d| d / 2).sum(),
            node_degree,
            total_links: topology.num_nodes() * node_degree / 2,
            avg_distance_sampled: sampled_average_distance(topology),
            bisection_width: if config.is_square() && dims.len() == 2 {
                Some(dims[0] * 2)
            } else {
                None
            },
            link_bandwidth_gbps: config.link_bandwidth_gbps,
            link_latency_ns: config.link_latency_ns,
            hop_latency_ns: config.hop_latency_ns,
        }
    }

    /// Human-readable summary block
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push("=".repeat(70));
        lines.push("                    TORUS TOPOLOGY INFO".to_string());
        lines.push("=".repeat(70));
        lines.push(format!("Dimensions:        [{}]", format_dimensions(&self.dimensions, " x ")));
        lines.push(format!("D (# of dims):     {}", self.num_dimensions));
        lines.push(format!("Total Nodes:       {}", self.total_nodes));
        lines.push(format!("Ports per Node:    {}", self.ports_per_node));
        lines.push(format!("Is Square:         {}", yes_no(self.is_square)));
        lines.push(format!("Power of 2 dims:   {}", yes_no(self.all_power_of_two)));
        lines.push(format!("Network Diameter:  {} hops", self.diameter));
        lines.push(format!("Link Bandwidth:    {} Gb/s", self.link_bandwidth_gbps));
        lines.push(format!("Link Latency:      {} ns", self.link_latency_ns));
        lines.push(format!("Hop Latency:       {} ns", self.hop_latency_ns));
        lines.push("=".repeat(70));
        lines
    }

    /// Degree, link count and distance statistics
    pub fn render_statistics(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push("Topology Statistics:".to_string());
        lines.push("-".repeat(70));
        lines.push(format!("Node Degree:       {} (uniform)", self.node_degree));
        lines.push(format!("Total Links:       {}", self.total_links));
        if let Some(avg) = self.avg_distance_sampled {
            lines.push(format!("Avg Distance:      {:.2} hops (sampled)", avg));
        }
        if let Some(width) = self.bisection_width {
            lines.push(format!("Bisection Width:   {} links", width));
        }
        lines.push("-".repeat(70));
        lines
    }
}

/// Join extents with a separator, e.g. `8 x 8` or `8x8`
pub fn format_dimensions(dimensions: &[usize], separator: &str) -> String {
    dimensions
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn sampled_average_distance(topology: &TorusTopology) -> Option<f64> {
    let nodes = &topology.nodes()[..topology.num_nodes().min(DISTANCE_SAMPLE_NODES)];
    let mut total = 0usize;
    let mut count = 0usize;
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            total += topology.node_distance(a, b);
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(total as f64 / count as f64)
    }
}

/// List the first `count` nodes with their neighbor slots
pub fn render_sample_nodes(topology: &TorusTopology, count: usize) -> Vec<String> {
    let shown = count.min(topology.num_nodes());
    let mut lines = vec![format!("Sample Nodes (showing first {}):", shown), "-".repeat(70)];
    for node in topology.nodes().iter().take(shown) {
        let neighbors: Vec<String> = node.neighbors().iter().map(|n| n.to_string()).collect();
        lines.push(format!("{} -> Neighbors: [{}]", node, neighbors.join(", ")));
    }
    lines.push("-".repeat(70));
    lines
}

/// Pairwise distance matrix of the first `max_nodes` nodes
pub fn render_distance_matrix(topology: &TorusTopology, max_nodes: usize) -> Vec<String> {
    let nodes = &topology.nodes()[..max_nodes.min(topology.num_nodes())];
    let n = nodes.len();

    let mut lines = vec![format!("Distance Matrix (first {}x{} nodes):", n, n)];
    let mut header = String::from("    ");
    for j in 0..n {
        header.push_str(&format!("{:>3}", j));
    }
    lines.push(header);

    for (i, a) in nodes.iter().enumerate() {
        let mut row = format!("{:>3} ", i);
        for b in nodes {
            row.push_str(&format!("{:>3}", topology.node_distance(a, b)));
        }
        lines.push(row);
    }
    lines
}
