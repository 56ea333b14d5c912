//! Shared utilities: vector size parsing and formatting.

pub mod size;

pub use size::{default_vector_sizes, human_bytes, parse_size, SizeParseError};
