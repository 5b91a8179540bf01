//! Command-line argument definitions for the `yuma` binary
//!
//! Uses the clap derive API. Every subcommand shares [`CommonArgs`] for
//! inputs, logging and configuration.

use crate::app::services::frame_writer::ExportFormat;
use crate::constants::MAX_DISPLAY_PRECISION;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the YUMA almanac tools
#[derive(Debug, Clone, Parser)]
#[command(
    name = "yuma",
    version,
    about = "Parse GPS YUMA almanac files into satellite parameter tables",
    long_about = "Reads GPS YUMA almanac files as published by the USCG NAVCEN and turns them \
                  into per-satellite tables of orbital and clock parameters. Tables can be \
                  printed, exported to Parquet or CSV, or checked for structural validity."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse almanac files and print their tables
    Read(ReadArgs),
    /// Combine almanac files into one Parquet or CSV file
    Export(ExportArgs),
    /// Check almanac files with the strict required-field gate
    Validate(ValidateArgs),
}

/// Arguments shared by every subcommand
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Almanac files, directories or glob patterns
    ///
    /// Directories are scanned recursively for *.alm and *.txt files.
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// ~/.config/yuma-tools/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Almanac epoch to use instead of inferring it from the file
    #[arg(
        long = "epoch",
        value_name = "YYYY-MM-DD",
        help = "Epoch date for every input (overrides filename and file time)"
    )]
    pub epoch: Option<NaiveDate>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the read command
#[derive(Debug, Clone, Parser)]
pub struct ReadArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// strftime pattern for the Time column
    #[arg(
        long = "time-format",
        value_name = "FORMAT",
        help = "strftime pattern for the Time column (default %Y-%m-%d)",
        conflicts_with = "raw_time"
    )]
    pub time_format: Option<String>,

    /// Keep the Time column as full timestamps
    #[arg(long = "raw-time", help = "Keep the Time column as full UTC timestamps")]
    pub raw_time: bool,

    /// Accept files whose PRN, Week or Time column is entirely missing
    #[arg(long = "lenient", help = "Disable the strict required-field check")]
    pub lenient: bool,

    /// Digits after the decimal point for float columns
    #[arg(
        long = "precision",
        value_name = "N",
        help = "Digits after the decimal point when printing floats"
    )]
    pub precision: Option<usize>,

    /// Output format
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for parsed tables"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output file for the combined table"
    )]
    pub output: PathBuf,

    /// Export format, guessed from the output extension when omitted
    #[arg(long = "format", value_enum, help = "Export format (parquet or csv)")]
    pub format: Option<ExportKind>,

    /// Accept files whose PRN, Week or Time column is entirely missing
    #[arg(long = "lenient", help = "Disable the strict required-field check")]
    pub lenient: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format for the read command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON records for scripting
    Json,
}

/// Export file formats selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Parquet,
    Csv,
}

impl From<ExportKind> for ExportFormat {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Parquet => ExportFormat::Parquet,
            ExportKind::Csv => ExportFormat::Csv,
        }
    }
}

impl Commands {
    /// Arguments shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Read(args) => &args.common,
            Commands::Export(args) => &args.common,
            Commands::Validate(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if self.inputs.iter().all(|input| input.trim().is_empty()) {
            return Err(Error::configuration("At least one input is required"));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }
}

impl ReadArgs {
    /// Validate the read command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if let Some(precision) = self.precision {
            if precision > MAX_DISPLAY_PRECISION {
                return Err(Error::configuration(format!(
                    "Precision cannot exceed {}",
                    MAX_DISPLAY_PRECISION
                )));
            }
        }

        Ok(())
    }
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if self.output.is_dir() {
            return Err(Error::configuration(format!(
                "Output path is a directory: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Explicit format, or the one implied by the output extension
    pub fn export_format(&self) -> ExportFormat {
        match self.format {
            Some(kind) => kind.into(),
            None => ExportFormat::from_path(&self.output),
        }
    }
}
