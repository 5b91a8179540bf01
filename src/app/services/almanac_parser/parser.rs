//! Core YUMA almanac parser implementation
//!
//! This module provides the single-pass line scan that turns almanac text into
//! satellite records, and the structural checks that decide whether the
//! result is usable.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

use super::field_parsers::{field_value, is_record_start, match_field, parse_integer};
use super::record_builder::RecordBuilder;
use super::stats::ParseStats;
use crate::app::models::{AlmanacTable, Column, SatelliteRecord};
use crate::constants::{WEEK_HEADER_PREFIX, WEEK_NUMBER_PATTERN};
use crate::{Error, Result};

static WEEK_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WEEK_NUMBER_PATTERN).expect("week number pattern is valid"));

/// Options controlling validation and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseOptions {
    /// Reject the parse when PRN, Week or Time is null in every record
    pub strict: bool,

    /// Log each malformed field at warn level instead of debug
    pub verbose: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: true,
            verbose: true,
        }
    }
}

impl ParseOptions {
    pub fn strict(strict: bool) -> Self {
        Self {
            strict,
            ..Default::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// YUMA almanac parser
///
/// Field-level problems degrade to missing values; only structural problems
/// (empty input, no records, required columns wholly absent under strict
/// mode) are returned as errors.
#[derive(Debug, Clone, Default)]
pub struct AlmanacParser {
    options: ParseOptions,
}

impl AlmanacParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse almanac text already held in memory
    pub fn parse_str(&self, content: &str, epoch: Option<DateTime<Utc>>) -> Result<AlmanacTable> {
        self.parse(content.lines(), epoch)
    }

    /// Parse a sequence of almanac lines
    ///
    /// Every record shares `epoch` as its Time value. Without an epoch the Time
    /// column is null, which strict mode rejects.
    pub fn parse<I, S>(&self, lines: I, epoch: Option<DateTime<Utc>>) -> Result<AlmanacTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = Scan::new(epoch, self.options.verbose);

        for line in lines {
            scan.feed(line.as_ref());
        }

        if scan.stats.lines_scanned == 0 {
            return Err(Error::EmptyInput);
        }

        let (records, mut stats) = scan.finish();

        if records.is_empty() {
            return Err(Error::NoRecordsProduced);
        }

        stats.records = records.len();
        let table = AlmanacTable::new(records, stats);

        if self.options.strict {
            let missing = table.missing_required_columns();
            if !missing.is_empty() {
                return Err(Error::missing_required_fields(
                    missing.iter().map(Column::name),
                ));
            }
        }

        if self.options.verbose {
            info!("Parsed {} almanac records", table.len());
        } else {
            debug!("Parsed {} almanac records", table.len());
        }

        Ok(table)
    }
}

/// Parse almanac lines with default diagnostics
pub fn parse_almanac<I, S>(
    lines: I,
    epoch: Option<DateTime<Utc>>,
    strict: bool,
) -> Result<AlmanacTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    AlmanacParser::new(ParseOptions::strict(strict)).parse(lines, epoch)
}

/// State of one linear scan over the input
struct Scan {
    epoch: Option<DateTime<Utc>>,
    verbose: bool,
    week: Option<i32>,
    current: Option<RecordBuilder>,
    records: Vec<SatelliteRecord>,
    stats: ParseStats,
}

impl Scan {
    fn new(epoch: Option<DateTime<Utc>>, verbose: bool) -> Self {
        Self {
            epoch,
            verbose,
            week: None,
            current: None,
            records: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        self.stats.lines_scanned += 1;

        let line = raw.trim();
        if line.is_empty() {
            self.stats.blank_lines += 1;
            return;
        }

        if line.starts_with(WEEK_HEADER_PREFIX) {
            self.week_header(line);
        } else if is_record_start(line) {
            self.start_record(line);
        } else {
            self.field_line(line);
        }
    }

    fn week_header(&mut self, line: &str) {
        self.stats.week_headers += 1;

        let week = WEEK_NUMBER
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_integer(m.as_str()));

        match week {
            Some(week) => self.week = Some(week),
            None => self.diagnostic(format!("Failed to parse week from header: {}", line)),
        }
    }

    fn start_record(&mut self, line: &str) {
        if let Some(builder) = self.current.take() {
            self.records.push(builder.build());
        }

        let prn = field_value(line).and_then(parse_integer);
        if prn.is_none() {
            self.diagnostic(format!("Failed to parse PRN from line: {}", line));
        }

        self.current = Some(RecordBuilder::start(prn, self.week, self.epoch));
    }

    fn field_line(&mut self, line: &str) {
        let Some(spec) = match_field(line) else {
            self.stats.unrecognized_lines += 1;
            return;
        };

        let value = field_value(line).and_then(|raw| spec.convert(raw));
        if value.is_none() {
            self.diagnostic(format!(
                "Failed to parse {} from line: {}",
                spec.column, line
            ));
        }

        self.current
            .get_or_insert_with(RecordBuilder::orphan)
            .set(spec, value);
    }

    fn diagnostic(&mut self, message: String) {
        if self.verbose {
            warn!("{}", message);
        } else {
            debug!("{}", message);
        }
        self.stats.warn(message);
    }

    fn finish(mut self) -> (Vec<SatelliteRecord>, ParseStats) {
        if let Some(builder) = self.current.take() {
            self.records.push(builder.build());
        }
        (self.records, self.stats)
    }
}
