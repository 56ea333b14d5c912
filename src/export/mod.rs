//! File exports.
//!
//! - `csv`: benchmark results table, plus a parser for reading it back
//! - `graph`: GraphViz DOT, adjacency list and node coordinate dumps of a torus

pub mod csv;
pub mod graph;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use self::csv::{parse_benchmark_csv, write_benchmark_csv, CsvRecord, CSV_HEADER};
pub use graph::{render_adjacency_list, render_coordinates_csv, render_dot};

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Write already-rendered text to `path`
pub fn write_text_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    log::info!("Exported {}", path.display());
    Ok(())
}
