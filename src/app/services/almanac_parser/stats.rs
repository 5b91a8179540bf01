//! Parsing statistics for YUMA almanac scans
//!
//! Tracks what a single scan saw, including the data-quality warnings that
//! degraded individual fields to missing values.

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of input lines, blank lines included
    pub lines_scanned: usize,

    /// Number of blank lines skipped
    pub blank_lines: usize,

    /// Number of week header lines seen
    pub week_headers: usize,

    /// Number of satellite records produced
    pub records: usize,

    /// Number of fields, PRNs and headers that could not be converted
    pub malformed_fields: usize,

    /// Number of non-blank lines matching no known label
    pub unrecognized_lines: usize,

    /// One message per malformed field, PRN or header
    pub warnings: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a data-quality warning
    pub(crate) fn warn(&mut self, message: String) {
        self.malformed_fields += 1;
        self.warnings.push(message);
    }

    /// Whether every recognized line converted cleanly
    pub fn is_clean(&self) -> bool {
        self.malformed_fields == 0
    }
}
