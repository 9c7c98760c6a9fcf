//! Human-readable duration and size fields.

use bytesize::ByteSize;
use std::time::Duration;

/// Status codes whose responses carry no body by protocol.
pub const BODILESS_STATUSES: [u16; 3] = [204, 205, 304];

/// Placeholder for a size that could not be determined.
pub const UNKNOWN_SIZE: &str = "-";

/// Formats an elapsed duration, e.g. `12ms` or `1.50s`.
#[must_use]
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Formats a byte count without a separator, e.g. `512B` or `4.1KB`.
#[must_use]
pub fn format_size(len: u64) -> String {
    ByteSize(len).to_string().replace(' ', "")
}

/// Computes the size field of a success line.
///
/// Bodiless statuses yield an empty field regardless of what was measured,
/// an unknown length yields `-`.
#[must_use]
pub fn size_field(status: u16, len: Option<u64>) -> String {
    if BODILESS_STATUSES.contains(&status) {
        return String::new();
    }
    match len {
        Some(len) => format_size(len),
        None => UNKNOWN_SIZE.to_string(),
    }
}
