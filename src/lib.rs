mod chart;
mod dataset;
mod error;
mod forecast;
mod pipeline;
mod power;
mod types;
mod utils;
mod weather_data;

pub use error::PowerError;
pub use pipeline::*;
pub use power::NasaPower;

pub use chart::{band_chart, render, ChartError, ChartTarget};

pub use types::compact_date::{CompactDate, CompactDateError};
pub use types::parameter::PowerParameter;
pub use types::schema::*;
pub use types::site::{LatLon, Site};

pub use weather_data::error::FetchError;
pub use weather_data::extractor::observation_frame_from_slice;
pub use weather_data::request::{FetchConfig, PointRequest, DEFAULT_BASE_URL, DEFAULT_COMMUNITY};

pub use dataset::error::DatasetError;
pub use dataset::filtering::*;
pub use dataset::store::*;

pub use forecast::config::*;
pub use forecast::error::ForecastError;
pub use forecast::model::{FittedForecaster, Forecaster};
pub use forecast::series::{ModelSeries, DS, Y};
pub use forecast::table::{ForecastScore, ForecastTable, YHAT, YHAT_LOWER, YHAT_UPPER};
