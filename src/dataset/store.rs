//! Flat-file persistence for observation tables.
//!
//! Parquet is the primary format. CSV is accepted as well, chosen by file
//! extension.

use crate::dataset::error::DatasetError;
use crate::types::schema::empty_observation_table;
use crate::utils::ensure_parent_dir_exists;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the training table lives unless told otherwise.
pub const DEFAULT_TRAIN_PATH: &str = "data/weather_train.parquet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<TableFormat, DatasetError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") | Some("pq") => Ok(TableFormat::Parquet),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

pub fn default_train_path() -> PathBuf {
    PathBuf::from(DEFAULT_TRAIN_PATH)
}

/// Writes `frame` to `path`, creating parent directories as needed.
/// ParquetWriter and CsvWriter both need `&mut df`.
pub fn write_table(frame: &mut DataFrame, path: &Path) -> Result<(), DatasetError> {
    let format = TableFormat::from_path(path)?;
    let write_io = |e: std::io::Error| DatasetError::WriteIo(path.to_path_buf(), e);
    ensure_parent_dir_exists(path).map_err(write_io)?;

    // An existing table is only replaced once encoding has succeeded.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_io)?;

    match format {
        TableFormat::Parquet => {
            ParquetWriter::new(temp_file.as_file_mut())
                .with_compression(ParquetCompression::Snappy)
                .finish(frame)
                .map_err(|e| DatasetError::WritePolars(path.to_path_buf(), e))?;
        }
        TableFormat::Csv => {
            CsvWriter::new(temp_file.as_file_mut())
                .include_header(true)
                .finish(frame)
                .map_err(|e| DatasetError::WritePolars(path.to_path_buf(), e))?;
        }
    }
    temp_file.persist(path).map_err(|e| write_io(e.error))?;

    info!(
        "Wrote {} rows x {} columns to {:?}",
        frame.height(),
        frame.width(),
        path
    );
    Ok(())
}

/// Reads a table written by [`write_table`] (or any compatible file).
///
/// CSV dates come back as strings. [`crate::dataset::filtering::coerce_date_column`]
/// turns them into real dates.
pub fn read_table(path: &Path) -> Result<DataFrame, DatasetError> {
    let format = TableFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| DatasetError::Open(path.to_path_buf(), e))?;

    let frame = match format {
        TableFormat::Parquet => ParquetReader::new(file).finish(),
        TableFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(file)
            .finish(),
    }
    .map_err(|e| DatasetError::Read(path.to_path_buf(), e))?;

    info!(
        "Read {} rows x {} columns from {:?}",
        frame.height(),
        frame.width(),
        path
    );
    Ok(frame)
}

/// Stacks tables sharing one schema on top of each other, in the given order.
/// No tables at all gives an empty observation table, not a column-less one.
pub fn stack_tables(frames: Vec<DataFrame>) -> Result<DataFrame, DatasetError> {
    let mut frames = frames.into_iter();
    let Some(mut stacked) = frames.next() else {
        return Ok(empty_observation_table());
    };
    for frame in frames {
        stacked.vstack_mut(&frame)?;
    }
    Ok(stacked)
}
