//! Parquet and CSV export of almanac tables

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use super::conversion::to_dataframe;
use crate::app::models::AlmanacTable;
use crate::constants::columns::TIME;
use crate::{Error, Result};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExportFormat {
    /// Apache Parquet with Snappy compression
    Parquet,
    /// Comma separated values with a header row
    Csv,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to Parquet
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Parquet,
        }
    }
}

/// Stack several tables into one DataFrame, in the order given
///
/// Tables whose Time column was never rendered (for instance one holding only
/// a Time-less orphan record) are cast to text when any other table is
/// rendered, so every frame shares one Time type.
pub fn concat_tables(tables: &[AlmanacTable]) -> Result<DataFrame> {
    let mut frames = tables.iter().map(to_dataframe).collect::<Result<Vec<_>>>()?;

    let time_dtype = if frames.iter().any(time_is_text) {
        DataType::String
    } else {
        DataType::Datetime(TimeUnit::Milliseconds, None)
    };
    for df in &mut frames {
        align_time(df, &time_dtype)?;
    }

    let mut frames = frames.into_iter();
    let Some(mut combined) = frames.next() else {
        return Err(Error::NoRecordsProduced);
    };

    for frame in frames {
        combined
            .vstack_mut(&frame)
            .map_err(|e| Error::polars("Failed to combine almanac tables", e))?;
    }

    Ok(combined)
}

fn time_is_text(df: &DataFrame) -> bool {
    df.column(TIME)
        .is_ok_and(|column| column.dtype() == &DataType::String)
}

fn align_time(df: &mut DataFrame, dtype: &DataType) -> Result<()> {
    let Ok(column) = df.column(TIME) else {
        return Ok(());
    };
    if column.dtype() == dtype {
        return Ok(());
    }

    let cast = column
        .cast(dtype)
        .map_err(|e| Error::polars("Failed to align Time column", e))?;
    df.with_column(cast)
        .map_err(|e| Error::polars("Failed to align Time column", e))?;
    Ok(())
}

/// Write a single table to `path`, returning the size of the written file
pub fn write_table(table: &AlmanacTable, path: &Path, format: ExportFormat) -> Result<u64> {
    let mut df = to_dataframe(table)?;
    write_frame(&mut df, path, format)
}

/// Write a DataFrame to `path`, returning the size of the written file
pub fn write_frame(df: &mut DataFrame, path: &Path, format: ExportFormat) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", parent.display()),
                e,
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    debug!(
        "Writing {} rows to {} as {:?}",
        df.height(),
        path.display(),
        format
    );

    match format {
        ExportFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Snappy)
                .finish(df)
                .map_err(|e| Error::polars(format!("Failed to write {}", path.display()), e))?;
        }
        ExportFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .map_err(|e| Error::polars(format!("Failed to write {}", path.display()), e))?;
        }
    }

    let size = std::fs::metadata(path)
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?
        .len();

    info!("Wrote {} ({} bytes)", path.display(), size);
    Ok(size)
}
