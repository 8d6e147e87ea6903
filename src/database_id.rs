//! Database identifier parsing
//!
//! Accepts the forms users copy out of Notion: a dashed UUID, the bare
//! 32-hex-digit form, or a URL whose trailing path segment carries the id.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}$")
        .expect("valid regex")
});

static HEX32_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{32}$").expect("valid regex"));

/// A validated, dashed database identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Normalize and validate a user-supplied identifier
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::validation("Database ID (--db) is required"));
        }

        let normalized = normalize(input);
        if !is_valid_uuid(&normalized) {
            return Err(Error::validation(format!(
                "The database ID must be in UUID format, got '{input}'. \
                 Example: f1a2b3c4-d5e6-7f8a-9b0c-1d2e3f4a5b6c"
            )));
        }

        Ok(Self(normalized))
    }

    /// The dashed identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DatabaseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Check the dashed 8-4-4-4-12 hex shape
pub fn is_valid_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Bring an identifier into dashed form where possible
///
/// A URL whose last path segment starts with 32 hex digits yields those
/// digits, even when the host contains dashes. Otherwise input that already
/// contains a dash is returned unchanged. Input that cannot be normalized is
/// returned as-is so validation can reject it.
pub fn normalize(input: &str) -> String {
    if let Some(segment) = trailing_segment(input) {
        if HEX32_RE.is_match(segment) {
            return dashed(segment);
        }
    }

    if input.contains('-') {
        return input.to_string();
    }

    if HEX32_RE.is_match(input) {
        return dashed(input);
    }

    if let Some(segment) = trailing_segment(input) {
        if segment.len() >= 32 {
            return normalize(segment);
        }
    }

    input.to_string()
}

/// Trailing path segment of a URL-like string
///
/// Query string and fragment are discarded. When the segment starts with 32
/// hex digits only those are kept, so `.../<id>?v=...` and `.../<id>` agree.
pub fn trailing_segment(input: &str) -> Option<&str> {
    if !input.contains('/') {
        return None;
    }

    let without_suffix = input
        .split(['?', '#'])
        .next()
        .unwrap_or(input)
        .trim_end_matches('/');
    let segment = without_suffix.rsplit('/').next()?;

    match segment.get(..32) {
        Some(head) if HEX32_RE.is_match(head) => Some(head),
        _ => Some(segment),
    }
}

fn dashed(hex: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
