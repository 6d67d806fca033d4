use crate::types::compact_date::CompactDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: CompactDate, end: CompactDate },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response")]
    JsonParse(#[from] serde_json::Error),

    #[error("Parameter '{0}' missing from response")]
    MissingParameter(String),

    // Keys are listed as the API spells them (YYYYMMDD)
    #[error("Parameter '{parameter}' does not report the same dates as T2M (missing: {missing:?}, unexpected: {unexpected:?})")]
    DateSetMismatch {
        parameter: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Response date key '{0}' is not a valid YYYYMMDD date")]
    InvalidDateKey(String),

    #[error("Parameter '{parameter}' has a non-numeric value on {date}: {value}")]
    NonNumericValue {
        parameter: String,
        date: String,
        value: String,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed building observation table: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
