//! Benchmark results CSV.
//!
//! One row per (vector size, algorithm) under a fixed header. Floating point
//! columns use the shortest representation that parses back to the same
//! value, so a written file reproduces its records exactly.

use std::io::{BufRead, Write};

use crate::export::ExportError;
use crate::report::types::{AlgorithmResult, SizeComparison};

pub const CSV_HEADER: &str = "VectorSizeBytes,Algorithm,Steps,Time_us,Goodput_Gbps,TotalBytes";

const FIELD_COUNT: usize = 6;

/// One CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    pub vector_size_bytes: u64,
    pub algorithm: String,
    pub steps: usize,
    pub time_us: f64,
    pub goodput_gbps: f64,
    pub total_bytes: u64,
}

impl CsvRecord {
    pub fn from_result(vector_size_bytes: u64, result: &AlgorithmResult) -> Self {
        Self {
            vector_size_bytes,
            algorithm: result.algorithm.clone(),
            steps: result.statistics.num_steps,
            time_us: result.statistics.estimated_time_us,
            goodput_gbps: result.statistics.goodput_gbps,
            total_bytes: result.statistics.total_bytes_sent,
        }
    }

    /// Records for every result, in run order
    pub fn from_comparisons(comparisons: &[SizeComparison]) -> Vec<Self> {
        comparisons
            .iter()
            .flat_map(|c| {
                c.results
                    .iter()
                    .map(move |r| Self::from_result(c.vector_size_bytes, r))
            })
            .collect()
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.vector_size_bytes,
            self.algorithm,
            self.steps,
            self.time_us,
            self.goodput_gbps,
            self.total_bytes
        )
    }
}

/// Write the header and one row per result
pub fn write_benchmark_csv<W: Write>(
    writer: &mut W,
    comparisons: &[SizeComparison],
) -> Result<(), ExportError> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for record in CsvRecord::from_comparisons(comparisons) {
        writeln!(writer, "{}", record.to_line())?;
    }
    Ok(())
}

/// Read a benchmark CSV back into records
pub fn parse_benchmark_csv<R: BufRead>(reader: R) -> Result<Vec<CsvRecord>, ExportError> {
    let mut lines = reader.lines().enumerate();

    match lines.next() {
        Some((_, header)) => {
            let header = header?;
            if header.trim_end() != CSV_HEADER {
                return Err(ExportError::Parse {
                    line: 1,
                    reason: format!("unexpected header '{}'", header),
                });
            }
        }
        None => {
            return Err(ExportError::Parse {
                line: 1,
                reason: "missing header".to_string(),
            })
        }
    }

    let mut records = Vec::new();
    for (index, line) in lines {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.trim_end().split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ExportError::Parse {
                line: line_no,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }

        records.push(CsvRecord {
            vector_size_bytes: parse_field(fields[0], "VectorSizeBytes", line_no)?,
            algorithm: fields[1].to_string(),
            steps: parse_field(fields[2], "Steps", line_no)?,
            time_us: parse_field(fields[3], "Time_us", line_no)?,
            goodput_gbps: parse_field(fields[4], "Goodput_Gbps", line_no)?,
            total_bytes: parse_field(fields[5], "TotalBytes", line_no)?,
        });
    }

    Ok(records)
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: &str, line: usize) -> Result<T, ExportError> {
    raw.trim().parse().map_err(|_| ExportError::Parse {
        line,
        reason: format!("invalid {} value '{}'", column, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::topology::TorusTopology;
    use std::io::Cursor;

    fn comparisons() -> Vec<SizeComparison> {
        let torus = TorusTopology::from_dimensions(&[4, 4]).unwrap();
        [32u64, 8192]
            .iter()
            .map(|&size| SizeComparison {
                vector_size_bytes: size,
                results: Algorithm::all()
                    .into_iter()
                    .map(|a| AlgorithmResult::new(a, a.execute(&torus, size)))
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn test_header_and_row_layout() {
        let mut out = Vec::new();
        write_benchmark_csv(&mut out, &comparisons()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "VectorSizeBytes,Algorithm,Steps,Time_us,Goodput_Gbps,TotalBytes");
        assert_eq!(lines.len(), 1 + 2 * 6);
        assert!(lines[1].starts_with("32,Swing (Bandwidth-Optimal),8,"));
        assert!(lines[12].starts_with("8192,Bucket Algorithm (Torus),12,"));
    }

    #[test]
    fn test_written_csv_parses_back_exactly() {
        let comparisons = comparisons();
        let mut out = Vec::new();
        write_benchmark_csv(&mut out, &comparisons).unwrap();

        let parsed = parse_benchmark_csv(Cursor::new(out)).unwrap();
        assert_eq!(parsed, CsvRecord::from_comparisons(&comparisons));
    }

    #[test]
    fn test_rejects_malformed_input() {
        let bad_header = "Size,Algorithm\n1,Ring,2,3,4,5\n";
        assert!(matches!(
            parse_benchmark_csv(Cursor::new(bad_header)),
            Err(ExportError::Parse { line: 1, .. })
        ));

        let short_row = format!("{}\n32,Ring Algorithm,30\n", CSV_HEADER);
        assert!(matches!(
            parse_benchmark_csv(Cursor::new(short_row)),
            Err(ExportError::Parse { line: 2, .. })
        ));

        let bad_number = format!("{}\n32,Ring Algorithm,thirty,1.0,2.0,100\n", CSV_HEADER);
        assert!(matches!(
            parse_benchmark_csv(Cursor::new(bad_number)),
            Err(ExportError::Parse { line: 2, .. })
        ));

        assert!(parse_benchmark_csv(Cursor::new("")).is_err());
    }
}
