use crate::config::{SimConfig, SizeSpec};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse a run configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: SimConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// Command-line values that take precedence over the YAML file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dimensions: Option<Vec<usize>>,
    pub link_bandwidth_gbps: Option<f64>,
    pub link_latency_ns: Option<f64>,
    pub hop_latency_ns: Option<f64>,
    pub vector_sizes: Option<Vec<u64>>,
    pub algorithms: Option<Vec<String>>,
    pub threads: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub dot: Option<PathBuf>,
    pub adjacency: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub text: Option<PathBuf>,
}

/// Apply CLI overrides to a configuration
pub fn apply_cli_overrides(config: &mut SimConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(dimensions) = &overrides.dimensions {
        info!("Overriding torus dimensions: {:?}", dimensions);
        config.topology.dimensions = dimensions.clone();
    }
    if let Some(bandwidth) = overrides.link_bandwidth_gbps {
        config.topology.link_bandwidth_gbps = bandwidth;
    }
    if let Some(latency) = overrides.link_latency_ns {
        config.topology.link_latency_ns = latency;
    }
    if let Some(hop_latency) = overrides.hop_latency_ns {
        config.topology.hop_latency_ns = hop_latency;
    }
    if let Some(sizes) = &overrides.vector_sizes {
        config.run.vector_sizes = sizes.iter().copied().map(SizeSpec::Bytes).collect();
    }
    if let Some(algorithms) = &overrides.algorithms {
        config.run.algorithms = Some(algorithms.clone());
    }
    if let Some(threads) = overrides.threads {
        config.run.threads = threads;
    }
    if let Some(dir) = &overrides.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(csv) = &overrides.csv {
        config.output.csv = csv.clone();
    }
    if let Some(dot) = &overrides.dot {
        config.output.dot = dot.clone();
    }
    if overrides.adjacency.is_some() {
        config.output.adjacency = overrides.adjacency.clone();
    }
    if overrides.json.is_some() {
        config.output.json = overrides.json.clone();
    }
    if overrides.text.is_some() {
        config.output.text = overrides.text.clone();
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
