//! Export command: combine almanac files into one Parquet or CSV file

use super::shared::{
    CommandStats, create_progress_bar, epoch_override, expand_inputs, load_configuration,
    setup_logging,
};
use crate::app::services::frame_writer::{concat_tables, write_frame};
use crate::app::services::table_reader::AlmanacReader;
use crate::cli::args::ExportArgs;
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Export command runner
///
/// Tables are stacked in input order. Inputs that fail to read are skipped
/// and counted; the export fails only when nothing could be read.
pub fn run_export(args: ExportArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.validate()?;

    let config = load_configuration(&args.common, |config| {
        if args.lenient {
            config.with_strict(false)
        } else {
            config
        }
    })?;

    let mut options = config.read_options();
    options.epoch = epoch_override(&args.common);
    let reader = AlmanacReader::new(options);

    let files = expand_inputs(&args.common.inputs)?;
    let format = args.export_format();
    info!(
        "Exporting {} files to {} as {:?}",
        files.len(),
        args.output.display(),
        format
    );

    let progress_bar = if args.common.show_progress() {
        Some(create_progress_bar(files.len() as u64, "Reading almanacs"))
    } else {
        None
    };

    let mut stats = CommandStats::default();
    let mut tables = Vec::with_capacity(files.len());

    for path in &files {
        match reader.try_read(path) {
            Ok(table) => {
                stats.files_read += 1;
                stats.records += table.len();
                tables.push(table);
            }
            Err(e) => {
                stats.files_failed += 1;
                warn!("Skipping {}: {}", path.display(), e);
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Almanacs read");
    }

    if tables.is_empty() {
        return Err(Error::NoRecordsProduced);
    }

    let mut frame = concat_tables(&tables)?;
    let size = write_frame(&mut frame, &args.output, format)?;
    stats
        .output_sizes
        .push((args.output.display().to_string(), size));
    stats.processing_time = start_time.elapsed();

    if !args.common.quiet {
        println!(
            "{} {} records from {} files to {} ({}) in {}",
            "Exported".green().bold(),
            stats.records,
            stats.files_read,
            args.output.display(),
            CommandStats::format_size(stats.total_output_size()),
            HumanDuration(stats.processing_time)
        );
        if stats.files_failed > 0 {
            println!(
                "{} {} files could not be read",
                "Skipped".yellow().bold(),
                stats.files_failed
            );
        }
    }

    Ok(stats)
}
