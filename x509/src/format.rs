//! Text helpers shared by the certificate and extension renderers.

use chrono::{DateTime, Utc};

/// Upper-case hex bytes joined by `:`, e.g. `AA:BB:CC`.
pub fn hex_array(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Splits `input` into lines of at most `size` characters, each prefixed
/// with `prefix`. Input that fits yields a single line.
pub fn split_string(input: &str, prefix: &str, size: usize) -> Vec<String> {
    if input.len() <= size || size == 0 {
        return vec![format!("{}{}", prefix, input)];
    }
    input
        .as_bytes()
        .chunks(size)
        .map(|chunk| format!("{}{}", prefix, String::from_utf8_lossy(chunk)))
        .collect()
}

/// Validity timestamp, e.g. `Jan  2 15:04:05 2026 UTC`.
pub fn validity_time(time: &DateTime<Utc>) -> String {
    time.format("%b %e %H:%M:%S %Y UTC").to_string()
}
