//! YUMA almanac parser
//!
//! This module converts YUMA almanac text into ordered satellite records
//! sharing one epoch, with an optional strict gate on the required columns.
//!
//! ## Architecture
//!
//! - [`parser`] - Line scan orchestration and structural validation
//! - [`field_parsers`] - Field label table and value converters
//! - [`record_builder`] - Record in progress during the scan
//! - [`stats`] - Parsing statistics and data-quality warnings
//!
//! ## Usage
//!
//! ```rust
//! use yuma_tools::app::services::almanac_parser::{AlmanacParser, ParseOptions};
//!
//! let text = "******** Week 268 almanac for PRN-01 ********\n\
//!             ID:                         01\n\
//!             Health:                     000\n\
//!             Eccentricity:               0.1234567D-01\n";
//!
//! let parser = AlmanacParser::new(ParseOptions::strict(false));
//! let table = parser.parse_str(text, None)?;
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.records()[0].eccentricity, Some(0.01234567));
//! # Ok::<(), yuma_tools::Error>(())
//! ```

pub mod field_parsers;
pub mod parser;
pub mod record_builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_parsers::{FIELD_TABLE, FieldSpec, parse_fortran_float};
pub use parser::{AlmanacParser, ParseOptions, parse_almanac};
pub use stats::ParseStats;
