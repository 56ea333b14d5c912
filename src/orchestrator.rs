//! Benchmark orchestrator.
//!
//! Drives a full run: builds the torus from a [`SimConfig`], evaluates every
//! selected algorithm at every vector size, and writes the configured
//! output files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use rayon::prelude::*;

use crate::algorithm::Algorithm;
use crate::config::SimConfig;
use crate::export::{self, write_benchmark_csv};
use crate::report::{self, AlgorithmResult, BenchmarkReport, ReportMetadata, SizeComparison};
use crate::topology::{TopologySummary, TorusTopology};

/// Evaluate every algorithm at one vector size, in the given order
pub fn run_comparison(
    topology: &TorusTopology,
    algorithms: &[Algorithm],
    vector_size_bytes: u64,
) -> SizeComparison {
    let results = algorithms
        .iter()
        .map(|algorithm| AlgorithmResult::new(*algorithm, algorithm.execute(topology, vector_size_bytes)))
        .collect();

    SizeComparison {
        vector_size_bytes,
        results,
    }
}

/// Evaluate all sizes; sizes run in parallel but keep their input order
pub fn run_benchmark(
    topology: &TorusTopology,
    algorithms: &[Algorithm],
    vector_sizes: &[u64],
) -> Vec<SizeComparison> {
    info!(
        "Running {} algorithms over {} vector sizes on {} nodes",
        algorithms.len(),
        vector_sizes.len(),
        topology.num_nodes()
    );

    vector_sizes
        .par_iter()
        .map(|&size| run_comparison(topology, algorithms, size))
        .collect()
}

/// Wrap comparisons with metadata and the topology summary
pub fn build_report(topology: &TorusTopology, comparisons: Vec<SizeComparison>) -> BenchmarkReport {
    BenchmarkReport {
        metadata: ReportMetadata {
            generated_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        topology: TopologySummary::from_topology(topology),
        comparisons,
    }
}

/// Paths written by [`write_outputs`]
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    pub csv: PathBuf,
    pub dot: PathBuf,
    pub adjacency: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub text: Option<PathBuf>,
}

/// Write CSV and DOT, plus the optional adjacency list, JSON and text reports
pub fn write_outputs(
    config: &SimConfig,
    topology: &TorusTopology,
    report: &BenchmarkReport,
) -> Result<WrittenFiles> {
    let output = &config.output;
    fs::create_dir_all(&output.directory).wrap_err_with(|| {
        format!(
            "Failed to create output directory '{}'",
            output.directory.display()
        )
    })?;

    let csv_path = output.resolve(&output.csv);
    let file = File::create(&csv_path)
        .wrap_err_with(|| format!("Failed to create '{}'", csv_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_benchmark_csv(&mut writer, &report.comparisons)
        .wrap_err_with(|| format!("Failed to write '{}'", csv_path.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("Failed to write '{}'", csv_path.display()))?;
    info!("Benchmark results written to {}", csv_path.display());

    let dot_path = output.resolve(&output.dot);
    export::write_text_file(&dot_path, &export::render_dot(topology))
        .wrap_err_with(|| format!("Failed to write '{}'", dot_path.display()))?;

    let adjacency = match &output.adjacency {
        Some(file) => {
            let path = output.resolve(file);
            export::write_text_file(&path, &export::render_adjacency_list(topology))
                .wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
            Some(path)
        }
        None => None,
    };

    let json = match &output.json {
        Some(file) => {
            let path = output.resolve(file);
            report::generate_json_report(report, &path)?;
            Some(path)
        }
        None => None,
    };

    let text = match &output.text {
        Some(file) => {
            let path = output.resolve(file);
            report::write_text_report(report, &path)?;
            Some(path)
        }
        None => None,
    };

    Ok(WrittenFiles {
        csv: csv_path,
        dot: dot_path,
        adjacency,
        json,
        text,
    })
}

/// Run a validated configuration end to end
pub fn run_from_config(config: &SimConfig) -> Result<(BenchmarkReport, WrittenFiles)> {
    config.validate()?;

    let topology =
        TorusTopology::new(config.topology.clone()).wrap_err("Failed to build torus topology")?;
    let algorithms = config.run.selected_algorithms()?;
    let sizes = config.run.vector_sizes_bytes()?;

    let comparisons = run_benchmark(&topology, &algorithms, &sizes);
    let report = build_report(&topology, comparisons);
    let written = write_outputs(config, &topology, &report)?;

    info!("Benchmark complete");
    Ok((report, written))
}
