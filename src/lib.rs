//! # SwingSim - Analytic AllReduce cost model for torus networks
//!
//! This library estimates how long an AllReduce collective takes on a
//! multi-dimensional torus when it is run with the Swing algorithm, and
//! compares it against Recursive Doubling, Ring and Bucket.
//!
//! ## Overview
//!
//! Nothing is simulated packet by packet. Each algorithm is expanded into its
//! sequence of synchronized steps, and every step is charged a link latency,
//! a serialization time for its message size, and a per-hop latency for the
//! distance the message travels. The result is a deterministic estimate that
//! reproduces the step counts, byte volumes and relative rankings reported
//! for Swing.
//!
//! ## Key Features
//!
//! - **Torus Topologies**: Any number of dimensions, any extent ≥ 2
//! - **Swing**: Bandwidth-optimal and latency-optimal variants
//! - **Baselines**: Recursive Doubling (both variants), Ring, and Bucket
//! - **Sweeps**: Every selected algorithm over a list of vector sizes
//! - **Exports**: CSV results, GraphViz DOT, adjacency lists, JSON reports
//!
//! ## Architecture
//!
//! - `topology`: Torus construction, coordinates, neighbors, distances, summary
//! - `algorithm`: The four AllReduce strategies and the shared cost model
//! - `config`: Run configuration structures and validation
//! - `config_loader`: YAML loading and command-line overrides
//! - `orchestrator`: Runs a sweep and writes its output files
//! - `report`: Console tables and JSON/text reports
//! - `export`: CSV, DOT, adjacency and coordinate dumps
//! - `utils`: Vector size parsing and formatting
//!
//! ## Example Usage
//!
//! ```rust
//! use swingsim::algorithm::{Algorithm, Variant};
//! use swingsim::topology::TorusTopology;
//!
//! let torus = TorusTopology::from_dimensions(&[8, 8])?;
//! let stats = Algorithm::Swing(Variant::BandwidthOptimal).execute(&torus, 8192);
//!
//! assert_eq!(stats.num_steps, 12);
//! assert!(stats.estimated_time_us > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! topology:
//!   dimensions: [8, 8]
//!   link_bandwidth_gbps: 400.0
//!   link_latency_ns: 100.0
//!   hop_latency_ns: 300.0
//!
//! run:
//!   vector_sizes: [32, "8KiB", "8MiB"]
//!   algorithms: [swing-bw, swing-lat, ring]
//!
//! output:
//!   directory: results
//!   json: report.json
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed errors (`TopologyError`, `ValidationError`,
//! `ExportError`). The orchestrator and report writers return
//! `color_eyre::Result` with context attached.

pub mod algorithm;
pub mod config;
pub mod config_loader;
pub mod export;
pub mod orchestrator;
pub mod report;
pub mod topology;
pub mod utils;
