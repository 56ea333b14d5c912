//! Vector size parsing and formatting.
//!
//! Sizes are given as an integer with an optional unit suffix
//! (e.g., "32", "512B", "8KiB", "2M").

use std::sync::LazyLock;

use regex::Regex;

static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(b|k|kb|kib|m|mb|mib|g|gb|gib)?\s*$").expect("Invalid size regex")
});

/// Error returned for unparseable size strings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid size '{0}' (expected e.g. 32, 512B, 8KiB, 2MiB, 1GB)")]
pub struct SizeParseError(pub String);

/// Parse a size string to bytes
///
/// Supported units (case-insensitive):
/// - Bytes: none, "B"
/// - Binary: "K"/"KiB", "M"/"MiB", "G"/"GiB"
/// - Decimal: "KB", "MB", "GB"
///
/// # Examples
/// ```
/// use swingsim::utils::size::parse_size;
///
/// assert_eq!(parse_size("32"), Ok(32));
/// assert_eq!(parse_size("8KiB"), Ok(8192));
/// assert_eq!(parse_size("2M"), Ok(2 * 1024 * 1024));
/// assert_eq!(parse_size("1KB"), Ok(1000));
/// assert!(parse_size("lots").is_err());
/// ```
pub fn parse_size(size: &str) -> Result<u64, SizeParseError> {
    let err = || SizeParseError(size.to_string());
    let caps = SIZE_PATTERN.captures(size).ok_or_else(err)?;
    let value: u64 = caps[1].parse().map_err(|_| err())?;

    let multiplier: u64 = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        None | Some("b") => 1,
        Some("k") | Some("kib") => 1 << 10,
        Some("m") | Some("mib") => 1 << 20,
        Some("g") | Some("gib") => 1 << 30,
        Some("kb") => 1_000,
        Some("mb") => 1_000_000,
        Some("gb") => 1_000_000_000,
        Some(_) => return Err(err()),
    };

    value.checked_mul(multiplier).ok_or_else(err)
}

/// Render a byte count with binary units, e.g. `8 KiB`, `1.5 MiB`
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if value.fract() == 0.0 {
        format!("{} {}", value as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// The vector sizes swept by default: 32 B to 8 MiB in steps of 4x
pub fn default_vector_sizes() -> Vec<u64> {
    vec![
        32,
        128,
        512,
        2 * 1024,
        8 * 1024,
        32 * 1024,
        128 * 1024,
        512 * 1024,
        2 * 1024 * 1024,
        8 * 1024 * 1024,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("0"), Ok(0));
        assert_eq!(parse_size("512B"), Ok(512));
        assert_eq!(parse_size("512 b"), Ok(512));
        assert_eq!(parse_size("2KiB"), Ok(2048));
        assert_eq!(parse_size("2k"), Ok(2048));
        assert_eq!(parse_size("128MiB"), Ok(128 << 20));
        assert_eq!(parse_size("1GiB"), Ok(1 << 30));
        assert_eq!(parse_size("3MB"), Ok(3_000_000));
        assert_eq!(parse_size(" 8 kib "), Ok(8192));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("").is_err());
        assert!(parse_size("KiB").is_err());
        assert!(parse_size("-4").is_err());
        assert!(parse_size("4TB").is_err());
        assert!(parse_size("1.5MiB").is_err());
        assert!(parse_size("99999999999999999999").is_err());
        assert!(parse_size("99999999999GiB").is_err());
    }

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(32), "32 B");
        assert_eq!(human_bytes(8192), "8 KiB");
        assert_eq!(human_bytes(1536 * 1024), "1.5 MiB");
        assert_eq!(human_bytes(8 << 20), "8 MiB");
    }

    #[test]
    fn test_default_sizes_grow_by_four() {
        let sizes = default_vector_sizes();
        assert_eq!(sizes.len(), 10);
        for pair in sizes.windows(2) {
            assert_eq!(pair[1], pair[0] * 4);
        }
    }
}
