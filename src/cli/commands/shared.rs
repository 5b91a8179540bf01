//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input discovery and reporting
//! helpers used by more than one subcommand.

use crate::cli::args::CommonArgs;
use crate::config::YumaConfig;
use crate::constants::ALMANAC_EXTENSIONS;
use crate::{Error, Result};
use chrono::{DateTime, NaiveTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Per-run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Inputs read into a table
    pub files_read: usize,
    /// Inputs that could not be read
    pub files_failed: usize,
    /// Satellite records across all tables
    pub records: usize,
    /// Total run time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl CommandStats {
    /// Whether every input was read successfully
    pub fn is_success(&self) -> bool {
        self.files_failed == 0
    }

    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("yuma_tools={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then config file, then CLI overrides
pub fn load_configuration(
    args: &CommonArgs,
    overrides: impl FnOnce(YumaConfig) -> YumaConfig,
) -> Result<YumaConfig> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, trying the per-user location"),
    }

    let mut config = YumaConfig::load_layered(args.config_file.as_deref())?;

    // Quiet runs keep parser diagnostics at debug level
    if args.quiet {
        config = config.with_verbose(false);
    }
    let config = overrides(config);

    config.validate()?;
    Ok(config)
}

/// Epoch override from `--epoch`, at midnight UTC
pub fn epoch_override(args: &CommonArgs) -> Option<DateTime<Utc>> {
    args.epoch.map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Whether a path has one of the almanac file extensions
pub fn is_almanac_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ALMANAC_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Discover almanac files in a directory tree, sorted by path
pub fn discover_almanac_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_almanac_file(path))
        .collect();

    // Sort files for consistent processing order
    files.sort();
    files
}

/// Expand files, directories and glob patterns into a list of almanac files
///
/// Explicit files are taken as given whatever their extension. Order follows
/// the inputs and duplicates are dropped.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        let matched = if path.is_dir() {
            discover_almanac_files(path)
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else if input.contains(['*', '?', '[']) {
            let pattern = glob::glob(input).map_err(|e| {
                Error::configuration(format!("Invalid glob pattern '{}': {}", input, e))
            })?;
            let mut matched: Vec<PathBuf> = pattern
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_file())
                .collect();
            matched.sort();
            matched
        } else {
            return Err(Error::not_found(input.clone()));
        };

        if matched.is_empty() {
            warn!("No almanac files found for input '{}'", input);
        }

        for file in matched {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    if files.is_empty() {
        return Err(Error::configuration("No almanac files matched the given inputs"));
    }

    info!("Found {} almanac files", files.len());
    Ok(files)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "ID: 01\n").unwrap();
    }

    #[test]
    fn test_format_size() {
        assert_eq!(CommandStats::format_size(512), "512 B");
        assert_eq!(CommandStats::format_size(1536), "1.50 KB");
        assert_eq!(CommandStats::format_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_command_stats() {
        let mut stats = CommandStats::default();
        assert!(stats.is_success());
        assert_eq!(stats.total_output_size(), 0);

        stats.output_sizes.push(("a.parquet".to_string(), 100));
        stats.output_sizes.push(("b.csv".to_string(), 50));
        stats.files_failed = 1;
        assert_eq!(stats.total_output_size(), 150);
        assert!(!stats.is_success());
    }

    #[test]
    fn test_is_almanac_file() {
        assert!(is_almanac_file(Path::new("yumaAlmanac_2024-03-05.alm")));
        assert!(is_almanac_file(Path::new("current.TXT")));
        assert!(!is_almanac_file(Path::new("notes.md")));
        assert!(!is_almanac_file(Path::new("almanac")));
    }

    #[test]
    fn test_discover_almanac_files_recurses_and_filters() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("2024/065.alm"));
        touch(&temp_dir.path().join("2024/066.alm"));
        touch(&temp_dir.path().join("current.txt"));
        touch(&temp_dir.path().join("README.md"));

        let files = discover_almanac_files(temp_dir.path());

        assert_eq!(files.len(), 3);
        assert!(files.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_expand_inputs_mixes_sources_without_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.alm");
        let b = temp_dir.path().join("b.alm");
        touch(&a);
        touch(&b);

        let inputs = vec![
            a.to_string_lossy().to_string(),
            temp_dir.path().join("*.alm").to_string_lossy().to_string(),
            temp_dir.path().to_string_lossy().to_string(),
        ];
        let files = expand_inputs(&inputs).unwrap();

        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_expand_inputs_missing_file() {
        let result = expand_inputs(&["/nonexistent/almanac.alm".to_string()]);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_expand_inputs_with_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.alm").to_string_lossy().to_string();

        assert!(matches!(
            expand_inputs(&[pattern]),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_epoch_override_is_midnight_utc() {
        use clap::Parser;

        let args = crate::cli::args::Args::try_parse_from([
            "yuma",
            "validate",
            "a.alm",
            "--epoch",
            "2024-03-05",
        ])
        .unwrap();
        let epoch = epoch_override(args.command.unwrap().common()).unwrap();

        assert_eq!(epoch.to_rfc3339(), "2024-03-05T00:00:00+00:00");
    }
}
