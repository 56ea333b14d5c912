use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use swingsim::config::SimConfig;
use swingsim::config_loader::{self, CliOverrides};
use swingsim::orchestrator;
use swingsim::report::format_comparison_table;
use swingsim::topology::TorusConfig;
use swingsim::utils::size::parse_size;

/// Torus shape used when neither dimensions nor a config file are given
const DEFAULT_DIMENSIONS: [usize; 2] = [8, 8];

/// Compare AllReduce algorithms on a torus network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Torus extents, e.g. `8 8` or `4 4 4` (default 8 x 8)
    dimensions: Vec<usize>,

    /// Path to a run configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Link bandwidth in Gb/s
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Fixed per-message link latency in ns
    #[arg(long)]
    latency: Option<f64>,

    /// Latency per hop in ns
    #[arg(long)]
    hop_latency: Option<f64>,

    /// Comma-separated vector sizes, e.g. `32,8KiB,8MiB`
    #[arg(long, value_delimiter = ',', value_parser = parse_size_arg)]
    sizes: Vec<u64>,

    /// Algorithm to run (swing-bw, swing-lat, rd-bw, rd-lat, ring, bucket); repeatable
    #[arg(short, long = "algorithm")]
    algorithms: Vec<String>,

    /// Output directory for generated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Benchmark CSV file name
    #[arg(long)]
    csv: Option<PathBuf>,

    /// GraphViz DOT file name
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Also write an adjacency list to this file
    #[arg(long)]
    adjacency: Option<PathBuf>,

    /// Also write a JSON report to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also write a plain-text report to this file
    #[arg(long)]
    text: Option<PathBuf>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_size_arg(raw: &str) -> Result<u64, String> {
    parse_size(raw).map_err(|e| e.to_string())
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dimensions: (!self.dimensions.is_empty()).then(|| self.dimensions.clone()),
            link_bandwidth_gbps: self.bandwidth,
            link_latency_ns: self.latency,
            hop_latency_ns: self.hop_latency,
            vector_sizes: (!self.sizes.is_empty()).then(|| self.sizes.clone()),
            algorithms: (!self.algorithms.is_empty()).then(|| self.algorithms.clone()),
            threads: self.threads,
            output_dir: self.output_dir.clone(),
            csv: self.csv.clone(),
            dot: self.dot.clone(),
            adjacency: self.adjacency.clone(),
            json: self.json.clone(),
            text: self.text.clone(),
        }
    }

    /// Config file (or the default torus) with command-line values applied
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => config_loader::load_config(path)?,
            None => SimConfig::for_topology(TorusConfig::with_dimensions(DEFAULT_DIMENSIONS.to_vec())),
        };
        config_loader::apply_cli_overrides(&mut config, &self.overrides())?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let config = args.resolve_config()?;

    if config.run.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.run.threads)
            .build_global()
            .wrap_err("Failed to configure thread pool")?;
    }

    info!("Starting SwingSim v{}", env!("CARGO_PKG_VERSION"));

    let (report, written) = orchestrator::run_from_config(&config)?;

    for line in report.topology.render() {
        println!("{}", line);
    }
    println!();

    for comparison in &report.comparisons {
        for line in format_comparison_table(comparison) {
            println!("{}", line);
        }
    }

    println!("Results exported to {}", written.csv.display());
    println!("Topology exported to {}", written.dot.display());
    if let Some(path) = &written.adjacency {
        println!("Adjacency list exported to {}", path.display());
    }
    if let Some(path) = &written.json {
        println!("JSON report exported to {}", path.display());
    }
    if let Some(path) = &written.text {
        println!("Text report exported to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["swingsim"]);
        assert!(args.dimensions.is_empty());
        assert_eq!(args.log_level, "info");

        let config = args.resolve_config().unwrap();
        assert_eq!(config.topology.dimensions, vec![8, 8]);
        assert_eq!(config.run.vector_sizes_bytes().unwrap().len(), 10);
        assert_eq!(config.run.selected_algorithms().unwrap().len(), 6);
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from([
            "swingsim",
            "4", "4", "4",
            "--sizes", "32,8KiB,1MiB",
            "--algorithm", "swing-bw",
            "--algorithm", "ring",
            "--hop-latency", "150",
            "-j", "2",
            "--text", "report.txt",
        ]);

        assert_eq!(args.dimensions, vec![4, 4, 4]);
        assert_eq!(args.sizes, vec![32, 8192, 1 << 20]);
        assert_eq!(args.algorithms, vec!["swing-bw", "ring"]);
        assert_eq!(args.hop_latency, Some(150.0));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.overrides().text, Some(PathBuf::from("report.txt")));
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        assert!(Args::try_parse_from(["swingsim", "--sizes", "12XB"]).is_err());
    }

    #[test]
    fn test_dimensions_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "topology:\n  dimensions: [16, 16]\n  link_bandwidth_gbps: 100.0\n"
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let args = Args::parse_from(["swingsim", "4", "8", "--config", path.as_str()]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.topology.dimensions, vec![4, 8]);
        assert_eq!(config.topology.link_bandwidth_gbps, 100.0);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let args = Args::parse_from(["swingsim", "--algorithm", "butterfly"]);
        assert!(args.resolve_config().is_err());
    }
}
