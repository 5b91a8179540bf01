//! YUMA Almanac Tools Library
//!
//! A Rust library for parsing GPS YUMA almanac files, as published by the
//! USCG NAVCEN, into structured per-satellite orbital parameter tables.
//!
//! This library provides tools for:
//! - Parsing YUMA almanac text with lenient per-field recovery and an optional
//!   strict required-field gate
//! - Reading almanac files with epoch inference from the filename or file metadata
//! - Converting parsed tables to polars DataFrames for display and export
//! - Fetching and caching almanac files through a pluggable transport

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod almanac_fetcher;
        pub mod almanac_parser;
        pub mod frame_writer;
        pub mod table_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AlmanacTable, AlmanacTime, Column, SatelliteRecord, TableIndex};
pub use app::services::almanac_parser::{AlmanacParser, ParseOptions, parse_almanac};
pub use app::services::table_reader::{AlmanacReader, ReadOptions};
pub use config::YumaConfig;

/// Result type alias for almanac processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for almanac parsing, reading and export
///
/// Per-field conversion failures are never reported through this type; they
/// degrade to missing values on the affected record.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Source file does not exist
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Input contained no lines at all
    #[error("Input is empty")]
    EmptyInput,

    /// Scan finished without producing a single record
    #[error("No valid records found in the YUMA almanac")]
    NoRecordsProduced,

    /// Strict mode: at least one required column is null in every record
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },

    /// No epoch could be resolved for the source
    #[error("Could not resolve an almanac epoch for '{source_name}'")]
    EpochUnresolved { source_name: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Almanac download failed
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// DataFrame construction or export failed
    #[error("Polars error: {message}")]
    Polars {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a missing required fields error
    pub fn missing_required_fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self::MissingRequiredFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an epoch resolution error
    pub fn epoch_unresolved(source_name: impl Into<String>) -> Self {
        Self::EpochUnresolved {
            source_name: source_name.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a polars error with context
    pub fn polars(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error came from the structural parse checks rather than I/O
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::NoRecordsProduced | Self::MissingRequiredFields { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_fields_display() {
        let err = Error::missing_required_fields(["PRN", "Time"]);
        assert_eq!(err.to_string(), "Missing required fields: PRN, Time");
        assert!(err.is_format_error());
    }

    #[test]
    fn test_io_error_is_not_format_error() {
        let err = Error::io(
            "read failed",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert!(!err.is_format_error());
        assert_eq!(err.to_string(), "I/O error: read failed");
    }
}
