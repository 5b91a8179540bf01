//! Almanac table reader
//!
//! Turns an almanac source into a time-indexed table:
//! - [`epoch`] - Epoch inference from source names and file metadata
//! - [`reader`] - Parser invocation, Time formatting and indexing

pub mod epoch;
pub mod reader;


pub use epoch::{EpochSource, epoch_from_name, resolve_epoch};
pub use reader::{AlmanacReader, ReadOptions, format_time, is_valid_time_format};
