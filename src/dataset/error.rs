use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Failed to open dataset '{0}'")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing dataset '{0}'")]
    WriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing dataset '{0}'")]
    WritePolars(PathBuf, #[source] PolarsError),

    #[error("Unsupported dataset format for '{0}' (expected .parquet or .csv)")]
    UnsupportedFormat(PathBuf),

    #[error("Required column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Location '{location}' not present in dataset (available: {available:?})")]
    LocationNotFound {
        location: String,
        available: Vec<String>,
    },

    #[error("Cannot coerce value '{value}' in column '{column}' to a date")]
    DateCoercion { column: String, value: String },

    #[error("Column '{column}' has type {dtype}, which cannot hold dates")]
    UnsupportedDateType { column: String, dtype: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
