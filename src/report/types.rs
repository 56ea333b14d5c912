//! Result types shared by the orchestrator, the report writers and the exporters.

use serde::{Deserialize, Serialize};

use crate::algorithm::{Algorithm, AlgorithmClass, Statistics};
use crate::topology::TopologySummary;

/// Outcome of one algorithm at one vector size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub algorithm: String,
    pub class: AlgorithmClass,
    pub statistics: Statistics,
}

impl AlgorithmResult {
    /// Keeps the totals only; the per-step trace is released here.
    pub fn new(algorithm: Algorithm, mut statistics: Statistics) -> Self {
        statistics.steps = Vec::new();
        Self {
            algorithm: algorithm.name().to_string(),
            class: algorithm.class(),
            statistics,
        }
    }
}

/// Every selected algorithm evaluated at one vector size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeComparison {
    pub vector_size_bytes: u64,
    pub results: Vec<AlgorithmResult>,
}

impl SizeComparison {
    /// Lowest estimated time among the results
    pub fn best_time_us(&self) -> Option<f64> {
        self.results
            .iter()
            .map(|r| r.statistics.estimated_time_us)
            .reduce(f64::min)
    }

    /// First result achieving the lowest estimated time
    pub fn fastest(&self) -> Option<&AlgorithmResult> {
        let best = self.best_time_us()?;
        self.results
            .iter()
            .find(|r| r.statistics.estimated_time_us <= best)
    }
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub tool_version: String,
}

/// Full sweep report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub metadata: ReportMetadata,
    pub topology: TopologySummary,
    pub comparisons: Vec<SizeComparison>,
}
