use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Required column '{0}' not found")]
    MissingColumn(String),

    #[error("Column '{column}' has type {dtype}, expected a date")]
    DateColumnType { column: String, dtype: String },

    #[error("Cannot fit a model to an empty series")]
    EmptySeries,

    #[error("Series has {found} observations, at least {required} are needed")]
    InsufficientHistory { required: usize, found: usize },

    #[error("Row {index} has no date")]
    MissingDate { index: usize },

    #[error("No target value on {date}")]
    MissingTarget { date: NaiveDate },

    #[error("Dates must be strictly increasing ({previous} is followed by {next})")]
    NonIncreasingDates { previous: NaiveDate, next: NaiveDate },

    #[error("Series must be daily without gaps ({previous} is followed by {next})")]
    IrregularSpacing { previous: NaiveDate, next: NaiveDate },

    #[error("{0} seasonality is not supported for a daily-resolution series")]
    UnsupportedSeasonality(&'static str),

    #[error("Interval width must lie strictly between 0 and 1, got {0}")]
    InvalidIntervalWidth(f64),

    #[error("Column lengths differ: {dates} dates, {values} values")]
    LengthMismatch { dates: usize, values: usize },

    #[error("Forecasting model failed: {0}")]
    Model(String),

    #[error("Forecast and holdout share no dates")]
    NoOverlap,

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
