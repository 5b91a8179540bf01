//! Field parsing utilities for YUMA almanac lines
//!
//! This module holds the ordered field label table and the value converters,
//! including the Fortran `D` exponent handling the format depends on.

use crate::app::models::Column;
use crate::constants::{
    FIELD_SEPARATOR, FORTRAN_EXPONENT, RECORD_START_LABEL, STANDARD_EXPONENT, labels,
};

/// Conversion applied to the text after a field label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Plain decimal integer
    Integer,
    /// Float, accepting `D` as the exponent marker
    FortranFloat,
}

/// Converted value of a field line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i32),
    Float(f64),
}

/// One entry of the label table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub column: Column,
    pub converter: Converter,
}

impl FieldSpec {
    const fn new(label: &'static str, column: Column, converter: Converter) -> Self {
        Self {
            label,
            column,
            converter,
        }
    }

    /// Convert a raw value with this field's converter
    pub fn convert(&self, raw: &str) -> Option<FieldValue> {
        match self.converter {
            Converter::Integer => parse_integer(raw).map(FieldValue::Integer),
            Converter::FortranFloat => parse_fortran_float(raw).map(FieldValue::Float),
        }
    }
}

/// Field labels checked in order against every non-header, non-`ID:` line.
///
/// No label is a prefix of another, so the first match is the only match.
pub static FIELD_TABLE: [FieldSpec; 11] = [
    FieldSpec::new(labels::HEALTH, Column::Health, Converter::Integer),
    FieldSpec::new(labels::ECCENTRICITY, Column::Eccentricity, Converter::FortranFloat),
    FieldSpec::new(
        labels::TIME_OF_APPLICABILITY,
        Column::TimeOfApplicability,
        Converter::FortranFloat,
    ),
    FieldSpec::new(
        labels::ORBITAL_INCLINATION,
        Column::OrbitalInclination,
        Converter::FortranFloat,
    ),
    FieldSpec::new(
        labels::RATE_OF_RIGHT_ASCEN,
        Column::RateOfRightAscen,
        Converter::FortranFloat,
    ),
    FieldSpec::new(labels::SQRT_A, Column::SqrtA, Converter::FortranFloat),
    FieldSpec::new(
        labels::RIGHT_ASCEN_AT_WEEK,
        Column::RightAscenAtWeek,
        Converter::FortranFloat,
    ),
    FieldSpec::new(
        labels::ARGUMENT_OF_PERIGEE,
        Column::ArgumentOfPerigee,
        Converter::FortranFloat,
    ),
    FieldSpec::new(labels::MEAN_ANOM, Column::MeanAnom, Converter::FortranFloat),
    FieldSpec::new(labels::AF0, Column::Af0, Converter::FortranFloat),
    FieldSpec::new(labels::AF1, Column::Af1, Converter::FortranFloat),
];

/// Find the table entry whose label starts the line
pub fn match_field(line: &str) -> Option<&'static FieldSpec> {
    FIELD_TABLE.iter().find(|spec| line.starts_with(spec.label))
}

/// Whether a line starts a new satellite record
pub fn is_record_start(line: &str) -> bool {
    line.starts_with(RECORD_START_LABEL)
}

/// Text after the first `:` of a line, trimmed
pub fn field_value(line: &str) -> Option<&str> {
    line.split_once(FIELD_SEPARATOR)
        .map(|(_, value)| value.trim())
}

/// Parse a decimal integer, tolerating surrounding whitespace
pub fn parse_integer(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Parse a float written in Fortran double precision notation
///
/// Every `D` is replaced with `E` before parsing, so `0.123456D-04` reads as
/// `0.123456E-04`. Standard notation passes through unchanged.
pub fn parse_fortran_float(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(FORTRAN_EXPONENT, STANDARD_EXPONENT)
        .parse::<f64>()
        .ok()
}

/// Labels that are a prefix of another label; empty for a well formed table
pub fn overlapping_labels() -> Vec<(&'static str, &'static str)> {
    let all_labels: Vec<&'static str> = std::iter::once(RECORD_START_LABEL)
        .chain(FIELD_TABLE.iter().map(|spec| spec.label))
        .collect();

    let mut overlaps = Vec::new();
    for (i, a) in all_labels.iter().enumerate() {
        for (j, b) in all_labels.iter().enumerate() {
            if i != j && b.starts_with(*a) {
                overlaps.push((*a, *b));
            }
        }
    }
    overlaps
}
