//! Epoch resolution for almanac sources
//!
//! The epoch comes from an ISO date embedded in the source name when there is
//! one, otherwise from the source's modification time.

use std::path::Path;
use std::sync::LazyLock;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use tracing::{debug, warn};

use crate::constants::FILENAME_DATE_PATTERN;
use crate::{Error, Result};

static FILENAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FILENAME_DATE_PATTERN).expect("filename date pattern is valid"));

/// Where an epoch was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochSource {
    /// Supplied by the caller
    Explicit,
    /// `YYYY-MM-DD` found in the source name
    FileName,
    /// Source modification time
    Modified,
}

/// Midnight UTC of the first valid `YYYY-MM-DD` date in a name
///
/// Only the first match is considered; an impossible date such as
/// `2024-13-40` yields `None`.
pub fn epoch_from_name(name: &str) -> Option<DateTime<Utc>> {
    let caps = FILENAME_DATE.captures(name)?;

    let year = caps[1].parse::<i32>().ok()?;
    let month = caps[2].parse::<u32>().ok()?;
    let day = caps[3].parse::<u32>().ok()?;

    match NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(midnight) => Some(midnight.and_utc()),
        None => {
            warn!("Failed to parse date from filename: {}", name);
            None
        }
    }
}

/// Last modification time of a file, in UTC
pub fn modified_time(path: &Path) -> Result<DateTime<Utc>> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        Error::io(
            format!("Failed to read metadata for {}", path.display()),
            e,
        )
    })?;
    let modified: SystemTime = metadata.modified().map_err(|e| {
        Error::io(
            format!("Modification time unavailable for {}", path.display()),
            e,
        )
    })?;
    Ok(DateTime::<Utc>::from(modified))
}

/// Pick the epoch for a source: explicit, then filename date, then modification time
pub fn resolve_epoch(
    explicit: Option<DateTime<Utc>>,
    name: &str,
    modified: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, EpochSource)> {
    if let Some(epoch) = explicit {
        return Ok((epoch, EpochSource::Explicit));
    }

    if let Some(epoch) = epoch_from_name(name) {
        debug!("Using epoch {} from filename {}", epoch, name);
        return Ok((epoch, EpochSource::FileName));
    }

    match modified {
        Some(epoch) => {
            debug!("Using modification time {} as epoch for {}", epoch, name);
            Ok((epoch, EpochSource::Modified))
        }
        None => Err(Error::epoch_unresolved(name)),
    }
}
