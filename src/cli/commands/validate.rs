//! Validate command: strict read of every input with a pass/fail report

use super::shared::{CommandStats, epoch_override, expand_inputs, load_configuration, setup_logging};
use crate::app::services::table_reader::AlmanacReader;
use crate::cli::args::ValidateArgs;
use crate::{AlmanacTable, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Validate command runner
///
/// Always reads with the strict required-field gate regardless of
/// configuration. Failures are reported per file and counted in the stats.
pub fn run_validate(args: ValidateArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);
    args.common.validate()?;

    let config = load_configuration(&args.common, |config| config.with_strict(true))?;

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
                println!("{}", pass_line(path, &table));
            }
            Err(e) => {
                stats.files_failed += 1;
                println!("{} {}: {}", "FAIL".red().bold(), path.display(), e);
            }
        }
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Validated {} files in {:.2}s: {} passed, {} failed",
        files.len(),
        stats.processing_time.as_secs_f64(),
        stats.files_read,
        stats.files_failed
    );

    if !args.common.quiet {
        let summary = format!("{} passed, {} failed", stats.files_read, stats.files_failed);
        if stats.is_success() {
            println!("{}", summary.green());
        } else {
            println!("{}", summary.red());
        }
    }

    Ok(stats)
}

fn pass_line(path: &Path, table: &AlmanacTable) -> String {
    let mut line = format!(
        "{} {} ({} records)",
        "PASS".green().bold(),
        path.display(),
        table.len()
    );

    let warnings = table.stats().warnings.len();
    if warnings > 0 {
        line.push_str(&format!(" {}", format!("[{} warnings]", warnings).yellow()));
    }
    line
}
