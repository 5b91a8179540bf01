//! Almanac table assembly from files and readers
//!
//! Wraps the parser with epoch resolution, Time formatting and indexing.
//! [`AlmanacReader::read`] flattens every failure into `None` for one-shot
//! batch use; the `try_*` methods keep the typed errors.

use std::fmt::Write as _;
use std::io::BufRead;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::epoch::{modified_time, resolve_epoch};
use crate::app::models::{AlmanacTable, AlmanacTime};
use crate::app::services::almanac_parser::{AlmanacParser, ParseOptions};
use crate::constants::DEFAULT_TIME_FORMAT;
use crate::{Error, Result};

/// Options for reading an almanac into a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// strftime format applied to the Time column; `None` keeps timestamps
    pub time_format: Option<String>,

    /// Reject files whose PRN, Week or Time column is wholly absent
    pub strict: bool,

    /// Log status and data-quality messages at info/warn level
    pub verbose: bool,

    /// Epoch to use instead of inferring one from the source
    pub epoch: Option<DateTime<Utc>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            time_format: Some(DEFAULT_TIME_FORMAT.to_string()),
            strict: true,
            verbose: true,
            epoch: None,
        }
    }
}

impl ReadOptions {
    /// Keep the Time column as timestamps
    pub fn with_raw_time(mut self) -> Self {
        self.time_format = None;
        self
    }

    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = Some(epoch);
        self
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::strict(self.strict).with_verbose(self.verbose)
    }
}

/// Reads YUMA almanac sources into time-indexed tables
#[derive(Debug, Clone, Default)]
pub struct AlmanacReader {
    options: ReadOptions,
}

impl AlmanacReader {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read an almanac file, reporting any failure as `None`
    pub fn read(&self, path: &Path) -> Option<AlmanacTable> {
        match self.try_read(path) {
            Ok(table) => Some(table),
            Err(e) => {
                if self.options.verbose {
                    error!("Error processing file '{}': {}", path.display(), e);
                } else {
                    debug!("Error processing file '{}': {}", path.display(), e);
                }
                None
            }
        }
    }

    /// Read an almanac file, keeping the typed error
    pub fn try_read(&self, path: &Path) -> Result<AlmanacTable> {
        if !path.is_file() {
            return Err(Error::not_found(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.options.verbose {
            info!("Parsing YUMA file: {}", path.display());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read file {}", path.display()), e)
        })?;

        // Modification time is only needed when nothing better is available
        let modified = match modified_time(path) {
            Ok(modified) => Some(modified),
            Err(e) => {
                debug!("{}", e);
                None
            }
        };

        self.assemble(content.lines(), &name, modified)
    }

    /// Read an almanac from any buffered source
    ///
    /// `name` stands in for the filename during epoch inference and
    /// `modified` for the file modification time.
    pub fn try_read_from<R: BufRead>(
        &self,
        source: R,
        name: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<AlmanacTable> {
        let lines = source
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| Error::io(format!("Failed to read {}", name), e))?;

        self.assemble(lines, name, modified)
    }

    fn assemble<I, S>(
        &self,
        lines: I,
        name: &str,
        modified: Option<DateTime<Utc>>,
    ) -> Result<AlmanacTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (epoch, source) = resolve_epoch(self.options.epoch, name, modified)?;
        debug!("Epoch for {}: {} ({:?})", name, epoch, source);

        let parser = AlmanacParser::new(self.options.parse_options());
        let mut table = parser.parse(lines, Some(epoch))?;

        if let Some(format) = &self.options.time_format {
            if let Err(reason) = format_time(&mut table, format) {
                warn!("Could not format 'Time' column: {}", reason);
            }
        }

        table.set_time_index();

        if self.options.verbose {
            info!("Parsed {} records from: {}", table.len(), name);
        }

        Ok(table)
    }
}

/// Whether chrono accepts a strftime format string
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render every timestamp in the Time column with `format`
///
/// Either every value is rendered or the table is left untouched.
pub fn format_time(table: &mut AlmanacTable, format: &str) -> std::result::Result<(), String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid time format '{}'", format));
    }

    // Render the distinct epochs up front so a failure leaves the table as is
    let mut rendered: Vec<(DateTime<Utc>, String)> = Vec::new();
    for record in table.iter() {
        let Some(ts) = record.time.as_ref().and_then(AlmanacTime::timestamp) else {
            continue;
        };
        if rendered.iter().any(|(seen, _)| *seen == ts) {
            continue;
        }
        let mut text = String::new();
        write!(text, "{}", ts.format_with_items(items.iter()))
            .map_err(|_| format!("could not render {} with '{}'", ts, format))?;
        rendered.push((ts, text));
    }

    table.map_time(|time| match time.timestamp() {
        Some(ts) => rendered
            .iter()
            .find(|(seen, _)| *seen == ts)
            .map(|(_, text)| AlmanacTime::Formatted(text.clone()))
            .unwrap_or_else(|| time.clone()),
        None => time.clone(),
    });

    Ok(())
}
