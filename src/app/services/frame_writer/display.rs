//! Tabular display of almanac tables
//!
//! Precision only changes how floats are printed; the table itself keeps
//! full double precision.

use polars::prelude::*;

use super::conversion::to_dataframe;
use crate::Result;
use crate::app::models::AlmanacTable;
use crate::constants::DEFAULT_DISPLAY_PRECISION;

/// Render a table for terminal display
pub fn render_table(table: &AlmanacTable, precision: Option<usize>) -> Result<String> {
    let df = to_dataframe(table)?;
    let display = display_frame(&df, precision.unwrap_or(DEFAULT_DISPLAY_PRECISION))?;
    Ok(display.to_string())
}

/// Copy of `df` with Float64 columns rendered as fixed-precision text
pub fn display_frame(df: &DataFrame, precision: usize) -> Result<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            if column.dtype() != &DataType::Float64 {
                return Ok(column.clone());
            }
            let values: Vec<Option<String>> = column
                .as_materialized_series()
                .f64()?
                .into_iter()
                .map(|v| v.map(|x| format!("{:.*}", precision, x)))
                .collect();
            Ok(Series::new(column.name().clone(), values).into())
        })
        .collect::<PolarsResult<Vec<Column>>>()?;

    Ok(DataFrame::new(columns)?)
}
