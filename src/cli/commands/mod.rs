//! Command implementations for the `yuma` CLI
//!
//! Each subcommand lives in its own module:
//! - `read`: print parsed tables
//! - `export`: combined Parquet or CSV output
//! - `validate`: strict pass/fail report

pub mod export;
pub mod read;
pub mod shared;
pub mod validate;

pub use shared::CommandStats;

use crate::Result;
use crate::cli::args::Commands;

/// Dispatch to the handler for a subcommand
pub fn run(command: Commands) -> Result<CommandStats> {
    match command {
        Commands::Read(read_args) => read::run_read(read_args),
        Commands::Export(export_args) => export::run_export(export_args),
        Commands::Validate(validate_args) => validate::run_validate(validate_args),
    }
}
