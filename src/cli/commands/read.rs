//! Read command: parse almanac files and print their tables

use super::shared::{CommandStats, epoch_override, expand_inputs, load_configuration, setup_logging};
use crate::app::models::SatelliteRecord;
use crate::app::services::frame_writer::render_table;
use crate::app::services::table_reader::AlmanacReader;
use crate::cli::args::{OutputFormat, ReadArgs};
use crate::{AlmanacTable, Error, Result};
use colored::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// One table in JSON output
#[derive(Debug, Serialize)]
struct JsonTable<'a> {
    source: String,
    records: &'a [SatelliteRecord],
}

/// Read command runner
///
/// Every input is read independently; a failing file is reported and the
/// remaining inputs are still printed.
pub fn run_read(args: ReadArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let config = load_configuration(&args.common, |mut config| {
        if args.lenient {
            config = config.with_strict(false);
        }
        if args.raw_time {
            config = config.with_raw_time();
        }
        if let Some(format) = &args.time_format {
            config = config.with_time_format(format.clone());
        }
        if let Some(precision) = args.precision {
            config = config.with_float_precision(precision);
        }
        config
    })?;
    debug!("Loaded configuration: {:?}", config);

    let mut options = config.read_options();
    options.epoch = epoch_override(&args.common);
    let reader = AlmanacReader::new(options);

    let files = expand_inputs(&args.common.inputs)?;
    let mut stats = CommandStats::default();

    for path in &files {
        match reader.try_read(path) {
            Ok(table) => {
                stats.files_read += 1;
                stats.records += table.len();
                print_table(path, &table, args.output_format, config.reading.float_precision)?;
            }
            Err(e) => {
                stats.files_failed += 1;
                error!("Failed to read {}: {}", path.display(), e);
            }
        }
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Read {} of {} files ({} records) in {:.2}s",
        stats.files_read,
        files.len(),
        stats.records,
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}

fn print_table(
    path: &Path,
    table: &AlmanacTable,
    format: OutputFormat,
    precision: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", path.display().to_string().bold());
            println!("{}", render_table(table, precision)?);
            println!();
        }
        OutputFormat::Json => {
            let output = JsonTable {
                source: path.display().to_string(),
                records: table.records(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| Error::io("Failed to serialise records", e.into()))?;
            println!("{}", json);
        }
    }
    Ok(())
}
