//! In-progress satellite record
//!
//! A builder holds the record currently being filled by the scan. It is
//! closed and appended when the next `ID:` line arrives or input ends.

use super::field_parsers::{FieldSpec, FieldValue};
use crate::app::models::{AlmanacTime, SatelliteRecord};
use chrono::{DateTime, Utc};

/// Builder for a single satellite record
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: SatelliteRecord,
}

impl RecordBuilder {
    /// Open a record at an `ID:` line, seeded with the block's week and the file epoch
    pub fn start(prn: Option<i32>, week: Option<i32>, epoch: Option<DateTime<Utc>>) -> Self {
        Self {
            record: SatelliteRecord {
                prn,
                week,
                time: epoch.map(AlmanacTime::Timestamp),
                ..Default::default()
            },
        }
    }

    /// Open a record for field lines seen before any `ID:` line
    pub fn orphan() -> Self {
        Self::default()
    }

    /// Store a converted value, or clear the field when conversion failed
    pub fn set(&mut self, spec: &FieldSpec, value: Option<FieldValue>) {
        match value {
            Some(FieldValue::Integer(v)) => self.record.set_int(spec.column, Some(v)),
            Some(FieldValue::Float(v)) => self.record.set_float(spec.column, Some(v)),
            None => {
                self.record.set_int(spec.column, None);
                self.record.set_float(spec.column, None);
            }
        }
    }

    pub fn build(self) -> SatelliteRecord {
        self.record
    }
}
