//! Run configuration.
//!
//! A YAML file describes the torus, the sweep to run and where results go:
//!
//! ```yaml
//! topology:
//!   dimensions: [8, 8]
//!   link_bandwidth_gbps: 400.0
//!   link_latency_ns: 100.0
//!   hop_latency_ns: 300.0
//! run:
//!   vector_sizes: [32, "8KiB", "2MiB"]
//!   algorithms: [swing-bw, ring, bucket]
//!   threads: 0
//! output:
//!   directory: "results"
//!   csv: "benchmark_results.csv"
//!   dot: "torus_topology.dot"
//!   json: "report.json"
//!   text: "report.txt"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::algorithm::Algorithm;
use crate::topology::TorusConfig;
use crate::utils::size::{default_vector_sizes, parse_size};

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub topology: TorusConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// A vector size written either as a byte count or as a string with units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Bytes(u64),
    Human(String),
}

impl SizeSpec {
    pub fn to_bytes(&self) -> Result<u64, ValidationError> {
        match self {
            SizeSpec::Bytes(bytes) => Ok(*bytes),
            SizeSpec::Human(text) => {
                parse_size(text).map_err(|e| ValidationError::InvalidRun(e.to_string()))
            }
        }
    }
}

/// Sweep settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_size_specs")]
    pub vector_sizes: Vec<SizeSpec>,
    /// Algorithm keys; all algorithms when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithms: Option<Vec<String>>,
    /// Worker threads for the sweep, 0 = auto-detect
    #[serde(default)]
    pub threads: usize,
}

fn default_size_specs() -> Vec<SizeSpec> {
    default_vector_sizes().into_iter().map(SizeSpec::Bytes).collect()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            vector_sizes: default_size_specs(),
            algorithms: None,
            threads: 0,
        }
    }
}

impl RunConfig {
    pub fn vector_sizes_bytes(&self) -> Result<Vec<u64>, ValidationError> {
        self.vector_sizes.iter().map(SizeSpec::to_bytes).collect()
    }

    pub fn selected_algorithms(&self) -> Result<Vec<Algorithm>, ValidationError> {
        match &self.algorithms {
            None => Ok(Algorithm::all()),
            Some(keys) => keys
                .iter()
                .map(|key| {
                    key.parse::<Algorithm>()
                        .map_err(|e| ValidationError::InvalidRun(e.to_string()))
                })
                .collect(),
        }
    }
}

/// Output file settings; relative file names resolve against `directory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_csv")]
    pub csv: PathBuf,
    #[serde(default = "default_dot")]
    pub dot: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjacency: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<PathBuf>,
    /// Plain-text copy of the comparison report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<PathBuf>,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_csv() -> PathBuf {
    PathBuf::from("benchmark_results.csv")
}

fn default_dot() -> PathBuf {
    PathBuf::from("torus_topology.dot")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            csv: default_csv(),
            dot: default_dot(),
            adjacency: None,
            json: None,
            text: None,
        }
    }
}

impl OutputConfig {
    /// Resolve an output file name against the output directory
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.directory.join(file)
    }
}

impl SimConfig {
    /// Configuration for the given torus with every other setting defaulted
    pub fn for_topology(topology: TorusConfig) -> Self {
        Self {
            topology,
            run: RunConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.topology
            .validate()
            .map_err(|e| ValidationError::InvalidTopology(e.to_string()))?;

        let sizes = self.run.vector_sizes_bytes()?;
        if sizes.is_empty() {
            return Err(ValidationError::InvalidRun(
                "vector_sizes cannot be empty".to_string(),
            ));
        }

        let algorithms = self.run.selected_algorithms()?;
        if algorithms.is_empty() {
            return Err(ValidationError::InvalidRun(
                "algorithms cannot be an empty list".to_string(),
            ));
        }

        if self.output.csv.as_os_str().is_empty() || self.output.dot.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutput(
                "output file names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid topology configuration: {0}")]
    InvalidTopology(String),
    #[error("Invalid run configuration: {0}")]
    InvalidRun(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Variant;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SimConfig = serde_yaml::from_str("topology:\n  dimensions: [4, 4]\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.run.vector_sizes_bytes().unwrap(), default_vector_sizes());
        assert_eq!(config.run.selected_algorithms().unwrap(), Algorithm::all());
        assert_eq!(config.output.csv, PathBuf::from("benchmark_results.csv"));
        assert_eq!(
            config.output.resolve(&config.output.dot),
            PathBuf::from("./torus_topology.dot")
        );
    }

    #[test]
    fn test_mixed_size_specs_and_algorithm_keys() {
        let yaml = r#"
topology:
  dimensions: [8, 8]
  link_bandwidth_gbps: 200.0
run:
  vector_sizes: [32, "8KiB", "2M"]
  algorithms: [swing-lat, bucket]
"#;
        let config: SimConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.topology.link_bandwidth_gbps, 200.0);
        assert_eq!(config.run.vector_sizes_bytes().unwrap(), vec![32, 8192, 2 << 20]);
        assert_eq!(
            config.run.selected_algorithms().unwrap(),
            vec![Algorithm::Swing(Variant::LatencyOptimal), Algorithm::Bucket]
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut config = SimConfig::for_topology(TorusConfig::with_dimensions(vec![8, 1]));
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTopology(_))));

        config.topology.dimensions = vec![8, 8];
        config.run.vector_sizes = vec![];
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRun(_))));

        config.run.vector_sizes = vec![SizeSpec::Human("huge".to_string())];
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRun(_))));

        config.run.vector_sizes = vec![SizeSpec::Bytes(64)];
        config.run.algorithms = Some(vec!["tree".to_string()]);
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRun(_))));

        config.run.algorithms = Some(vec![]);
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRun(_))));
    }
}
