//! Publication date normalization.
//!
//! Source dates arrive in heterogeneous formats (RFC 2822-style header
//! dates, ISO 8601 with and without sub-seconds). Everything parsable is
//! normalized to RFC 3339; everything else is explicitly `None`, never
//! silently dropped.

use chrono::DateTime;

/// Formats observed across the configured sources, tried after the RFC 3339
/// and RFC 2822 parsers.
const KNOWN_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
];

/// Parses a raw date string and normalizes it to RFC 3339.
///
/// Returns `None` for empty or unparsable input; the caller records the
/// sentinel and surfaces a diagnostic instead of failing the extraction.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.to_rfc3339());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.to_rfc3339());
    }
    for format in KNOWN_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.to_rfc3339());
        }
    }

    None
}
