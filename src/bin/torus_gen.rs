//! Torus topology generator CLI.
//!
//! Builds a torus, prints its summary and diagnostics, and dumps it as
//! GraphViz DOT, an adjacency list and a node coordinate table.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};

use swingsim::export::{self, render_adjacency_list, render_coordinates_csv, render_dot};
use swingsim::topology::summary::{render_distance_matrix, render_sample_nodes};
use swingsim::topology::{TopologySummary, TorusConfig, TorusTopology};

/// Largest torus whose distance matrix is printed
const MATRIX_MAX_NODES: usize = 64;
/// Nodes covered by the printed distance matrix
const DISTANCE_MATRIX_NODES: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "torus-gen")]
#[command(about = "Generate and inspect torus network topologies")]
#[command(version)]
struct Cli {
    /// Torus extents, e.g. `8 8` or `4 4 4`
    #[arg(required = true)]
    dimensions: Vec<usize>,

    /// Output directory for the generated files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
    println!();
}

/// Sample node listing, plus the distance matrix on small tori
fn node_diagnostics(topology: &TorusTopology) -> Vec<Vec<String>> {
    let small = topology.num_nodes() <= MATRIX_MAX_NODES;
    let mut blocks = vec![render_sample_nodes(topology, if small { 16 } else { 10 })];
    if small {
        blocks.push(render_distance_matrix(topology, DISTANCE_MATRIX_NODES));
    }
    blocks
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let topology = TorusTopology::new(TorusConfig::with_dimensions(cli.dimensions.clone()))
        .context("Failed to build torus topology")?;
    let summary = TopologySummary::from_topology(&topology);

    print_lines(summary.render());
    print_lines(summary.render_statistics());

    for block in node_diagnostics(&topology) {
        print_lines(block);
    }

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", cli.output_dir.display())
    })?;

    let outputs = [
        ("torus_topology.dot", render_dot(&topology)),
        ("torus_adj.txt", render_adjacency_list(&topology)),
        ("torus_coords.csv", render_coordinates_csv(&topology)),
    ];
    for (name, contents) in &outputs {
        let path = cli.output_dir.join(name);
        export::write_text_file(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Exported {}", path.display());
    }

    Ok(())
}
