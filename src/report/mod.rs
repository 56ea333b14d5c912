//! Report generation for AllReduce comparisons.
//!
//! Generates both JSON and human-readable text reports.

pub mod types;

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use crate::utils::size::human_bytes;

pub use types::{AlgorithmResult, BenchmarkReport, ReportMetadata, SizeComparison};

/// Generate JSON report
pub fn generate_json_report(report: &BenchmarkReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Console table for one vector size.
///
/// Every row but the fastest carries its slowdown relative to the fastest.
pub fn format_comparison_table(comparison: &SizeComparison) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Allreduce Vector Size: {} bytes ({})",
        comparison.vector_size_bytes,
        human_bytes(comparison.vector_size_bytes)
    ));
    lines.push("=".repeat(80));
    lines.push(format!(
        "{:<40}{:<12}{:<15}{:<15}{:<15}",
        "Algorithm", "Steps", "Time (μs)", "Goodput (Gb/s)", "Total Bytes"
    ));
    lines.push("=".repeat(80));

    let best_time = comparison.best_time_us().unwrap_or(0.0);
    for result in &comparison.results {
        let stats = &result.statistics;
        let mut row = format!(
            "{:<40}{:<12}{:<15.2}{:<15.2}{:<15}",
            result.algorithm,
            stats.num_steps,
            stats.estimated_time_us,
            stats.goodput_gbps,
            stats.total_bytes_sent
        );
        if stats.estimated_time_us > best_time && best_time > 0.0 {
            row.push_str(&format!(" ({:.2}x slower)", stats.estimated_time_us / best_time));
        } else {
            row.push_str(" FASTEST");
        }
        lines.push(row);
    }

    lines.push(String::new());
    lines
}

/// Human-readable report of a whole sweep
pub fn generate_text_report(report: &BenchmarkReport) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(80));
    lines.push("                       SWING ALLREDUCE COMPARISON".to_string());
    lines.push("=".repeat(80));
    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Tool Version: {}", report.metadata.tool_version));
    lines.push(String::new());

    lines.extend(report.topology.render());
    lines.push(String::new());

    for comparison in &report.comparisons {
        lines.extend(format_comparison_table(comparison));
    }

    // Winner per size
    lines.push("Fastest algorithm per vector size:".to_string());
    for comparison in &report.comparisons {
        if let Some(fastest) = comparison.fastest() {
            lines.push(format!(
                "  {:>10}: {} ({:.2} us)",
                human_bytes(comparison.vector_size_bytes),
                fastest.algorithm,
                fastest.statistics.estimated_time_us
            ));
        }
    }

    lines
}

/// Write the text report to a file
pub fn write_text_report(report: &BenchmarkReport, output_path: &Path) -> Result<()> {
    let mut text = generate_text_report(report).join("\n");
    text.push('\n');
    fs::write(output_path, text)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}
