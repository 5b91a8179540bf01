//! AlmanacTable to polars DataFrame conversion
//!
//! Integer columns map to Int32, float columns to Float64 and Time to a
//! millisecond Datetime, or to String once it has been rendered with a format.

use polars::prelude::*;

use crate::Result;
use crate::app::models::{AlmanacTable, AlmanacTime, Column as TableColumn, ColumnKind, TableIndex};

/// Column layout for a table: Time leads when the table is keyed by it
pub fn column_order(index: TableIndex) -> Vec<TableColumn> {
    match index {
        TableIndex::Positional => TableColumn::ALL.to_vec(),
        TableIndex::Time => std::iter::once(TableColumn::Time)
            .chain(
                TableColumn::ALL
                    .into_iter()
                    .filter(|column| *column != TableColumn::Time),
            )
            .collect(),
    }
}

/// Build a DataFrame with one row per satellite record
pub fn to_dataframe(table: &AlmanacTable) -> Result<DataFrame> {
    let columns = column_order(table.index())
        .into_iter()
        .map(|column| build_column(table, column))
        .collect::<Result<Vec<Column>>>()?;

    DataFrame::new(columns)
        .map_err(|e| crate::Error::polars("Failed to assemble almanac DataFrame", e))
}

fn build_column(table: &AlmanacTable, column: TableColumn) -> Result<Column> {
    let name = PlSmallStr::from_static(column.name());

    let series = match column.kind() {
        ColumnKind::Integer => {
            let values: Vec<Option<i32>> = table.iter().map(|r| r.int(column)).collect();
            Series::new(name, values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = table.iter().map(|r| r.float(column)).collect();
            Series::new(name, values)
        }
        ColumnKind::Time => time_series(table, name)?,
    };

    Ok(series.into())
}

fn time_series(table: &AlmanacTable, name: PlSmallStr) -> Result<Series> {
    let formatted = table
        .iter()
        .any(|r| matches!(r.time, Some(AlmanacTime::Formatted(_))));

    if formatted {
        let values: Vec<Option<String>> = table
            .iter()
            .map(|r| r.time.as_ref().map(ToString::to_string))
            .collect();
        return Ok(Series::new(name, values));
    }

    let millis: Vec<Option<i64>> = table
        .iter()
        .map(|r| {
            r.time
                .as_ref()
                .and_then(AlmanacTime::timestamp)
                .map(|ts| ts.timestamp_millis())
        })
        .collect();

    Series::new(name, millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .map_err(|e| crate::Error::polars("Failed to build Time column", e))
}
