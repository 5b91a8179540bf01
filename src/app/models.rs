//! Data models for YUMA almanac processing
//!
//! This module contains the core data structures for representing parsed
//! almanac records and the table assembled from them.

use crate::app::services::almanac_parser::ParseStats;
use crate::constants::columns;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Columns
// =============================================================================

/// Every column of an almanac table, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Prn,
    Week,
    Time,
    Health,
    Eccentricity,
    TimeOfApplicability,
    OrbitalInclination,
    RateOfRightAscen,
    SqrtA,
    RightAscenAtWeek,
    ArgumentOfPerigee,
    MeanAnom,
    Af0,
    Af1,
}

/// Representation of a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Time,
}

impl Column {
    /// All columns in the order records are laid out
    pub const ALL: [Column; 14] = [
        Column::Prn,
        Column::Week,
        Column::Time,
        Column::Health,
        Column::Eccentricity,
        Column::TimeOfApplicability,
        Column::OrbitalInclination,
        Column::RateOfRightAscen,
        Column::SqrtA,
        Column::RightAscenAtWeek,
        Column::ArgumentOfPerigee,
        Column::MeanAnom,
        Column::Af0,
        Column::Af1,
    ];

    /// Columns that strict mode requires to be present in at least one record
    pub const REQUIRED: [Column; 3] = [Column::Prn, Column::Week, Column::Time];

    /// External column name
    pub fn name(&self) -> &'static str {
        match self {
            Column::Prn => columns::PRN,
            Column::Week => columns::WEEK,
            Column::Time => columns::TIME,
            Column::Health => columns::HEALTH,
            Column::Eccentricity => columns::ECCENTRICITY,
            Column::TimeOfApplicability => columns::TIME_OF_APPLICABILITY,
            Column::OrbitalInclination => columns::ORBITAL_INCLINATION,
            Column::RateOfRightAscen => columns::RATE_OF_RIGHT_ASCEN,
            Column::SqrtA => columns::SQRT_A,
            Column::RightAscenAtWeek => columns::RIGHT_ASCEN_AT_WEEK,
            Column::ArgumentOfPerigee => columns::ARGUMENT_OF_PERIGEE,
            Column::MeanAnom => columns::MEAN_ANOM,
            Column::Af0 => columns::AF0,
            Column::Af1 => columns::AF1,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Prn | Column::Week | Column::Health => ColumnKind::Integer,
            Column::Time => ColumnKind::Time,
            _ => ColumnKind::Float,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Time Value
// =============================================================================

/// Reference epoch of an almanac, either as parsed or rendered as text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlmanacTime {
    /// UTC timestamp, as assigned by the parser
    Timestamp(DateTime<Utc>),
    /// Timestamp rendered with a caller supplied strftime format
    Formatted(String),
}

impl AlmanacTime {
    /// The underlying timestamp, if the value has not been rendered to text
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            AlmanacTime::Timestamp(ts) => Some(*ts),
            AlmanacTime::Formatted(_) => None,
        }
    }
}

impl fmt::Display for AlmanacTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlmanacTime::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            AlmanacTime::Formatted(text) => f.write_str(text),
        }
    }
}

impl From<DateTime<Utc>> for AlmanacTime {
    fn from(ts: DateTime<Utc>) -> Self {
        AlmanacTime::Timestamp(ts)
    }
}

// =============================================================================
// Satellite Record
// =============================================================================

/// Orbital and clock parameters for one satellite entry of an almanac
///
/// Any value whose source line was malformed or absent is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SatelliteRecord {
    #[serde(rename = "PRN")]
    pub prn: Option<i32>,
    pub week: Option<i32>,
    pub time: Option<AlmanacTime>,
    pub health: Option<i32>,
    pub eccentricity: Option<f64>,
    pub time_of_applicability: Option<f64>,
    pub orbital_inclination: Option<f64>,
    pub rate_of_right_ascen: Option<f64>,
    #[serde(rename = "SQRTA")]
    pub sqrt_a: Option<f64>,
    pub right_ascen_at_week: Option<f64>,
    pub argument_of_perigee: Option<f64>,
    pub mean_anom: Option<f64>,
    pub af0: Option<f64>,
    pub af1: Option<f64>,
}

impl SatelliteRecord {
    /// Integer value of an integer column, `None` for other columns
    pub fn int(&self, column: Column) -> Option<i32> {
        match column {
            Column::Prn => self.prn,
            Column::Week => self.week,
            Column::Health => self.health,
            _ => None,
        }
    }

    /// Float value of a float column, `None` for other columns
    pub fn float(&self, column: Column) -> Option<f64> {
        match column {
            Column::Eccentricity => self.eccentricity,
            Column::TimeOfApplicability => self.time_of_applicability,
            Column::OrbitalInclination => self.orbital_inclination,
            Column::RateOfRightAscen => self.rate_of_right_ascen,
            Column::SqrtA => self.sqrt_a,
            Column::RightAscenAtWeek => self.right_ascen_at_week,
            Column::ArgumentOfPerigee => self.argument_of_perigee,
            Column::MeanAnom => self.mean_anom,
            Column::Af0 => self.af0,
            Column::Af1 => self.af1,
            _ => None,
        }
    }

    /// Whether the given column holds a value
    pub fn has(&self, column: Column) -> bool {
        match column.kind() {
            ColumnKind::Integer => self.int(column).is_some(),
            ColumnKind::Float => self.float(column).is_some(),
            ColumnKind::Time => self.time.is_some(),
        }
    }

    pub(crate) fn set_int(&mut self, column: Column, value: Option<i32>) {
        match column {
            Column::Prn => self.prn = value,
            Column::Week => self.week = value,
            Column::Health => self.health = value,
            _ => {}
        }
    }

    pub(crate) fn set_float(&mut self, column: Column, value: Option<f64>) {
        match column {
            Column::Eccentricity => self.eccentricity = value,
            Column::TimeOfApplicability => self.time_of_applicability = value,
            Column::OrbitalInclination => self.orbital_inclination = value,
            Column::RateOfRightAscen => self.rate_of_right_ascen = value,
            Column::SqrtA => self.sqrt_a = value,
            Column::RightAscenAtWeek => self.right_ascen_at_week = value,
            Column::ArgumentOfPerigee => self.argument_of_perigee = value,
            Column::MeanAnom => self.mean_anom = value,
            Column::Af0 => self.af0 = value,
            Column::Af1 => self.af1 = value,
            _ => {}
        }
    }
}

// =============================================================================
// Almanac Table
// =============================================================================

/// How rows of an almanac table are keyed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableIndex {
    /// Rows keyed by their position in the source file
    #[default]
    Positional,
    /// Rows keyed by the Time column
    Time,
}

/// Ordered satellite records parsed from a single almanac
#[derive(Debug, Clone, PartialEq)]
pub struct AlmanacTable {
    records: Vec<SatelliteRecord>,
    index: TableIndex,
    stats: ParseStats,
}

impl AlmanacTable {
    pub(crate) fn new(records: Vec<SatelliteRecord>, stats: ParseStats) -> Self {
        Self {
            records,
            index: TableIndex::Positional,
            stats,
        }
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SatelliteRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index(&self) -> TableIndex {
        self.index
    }

    /// Statistics gathered while scanning the source
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Whether a column holds no value in any record
    pub fn column_is_null(&self, column: Column) -> bool {
        self.records.iter().all(|record| !record.has(column))
    }

    /// Required columns that are null in every record
    pub fn missing_required_columns(&self) -> Vec<Column> {
        Column::REQUIRED
            .into_iter()
            .filter(|column| self.column_is_null(*column))
            .collect()
    }

    /// Record for a given PRN, first match in file order
    pub fn find_prn(&self, prn: i32) -> Option<&SatelliteRecord> {
        self.records.iter().find(|record| record.prn == Some(prn))
    }

    /// Rewrite the Time value of every record
    pub(crate) fn map_time<F>(&mut self, mut f: F)
    where
        F: FnMut(&AlmanacTime) -> AlmanacTime,
    {
        for record in &mut self.records {
            if let Some(time) = record.time.as_ref() {
                record.time = Some(f(time));
            }
        }
    }

    /// Key the table by Time; records stay in file order
    pub fn set_time_index(&mut self) {
        self.index = TableIndex::Time;
    }
}

impl<'a> IntoIterator for &'a AlmanacTable {
    type Item = &'a SatelliteRecord;
    type IntoIter = std::slice::Iter<'a, SatelliteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
