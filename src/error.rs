use crate::chart::ChartError;
use crate::dataset::error::DatasetError;
use crate::forecast::error::ForecastError;
use crate::types::compact_date::CompactDateError;
use crate::weather_data::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    CompactDate(#[from] CompactDateError),
}
