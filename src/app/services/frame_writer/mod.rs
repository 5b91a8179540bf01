//! DataFrame conversion, display and export for almanac tables
//!
//! - [`conversion`] - AlmanacTable to polars DataFrame
//! - [`display`] - Fixed-precision terminal rendering
//! - [`writer`] - Parquet and CSV output

pub mod conversion;
pub mod display;
pub mod writer;


pub use conversion::{column_order, to_dataframe};
pub use display::{display_frame, render_table};
pub use writer::{ExportFormat, concat_tables, write_frame, write_table};
