//! Column names of the observation table, the one canonical schema shared by
//! the fetcher, the dataset store and the forecast adapter.

use crate::types::parameter::PowerParameter;
use polars::prelude::{DataFrame, DataType, Field, Schema};

pub const DATE: &str = "date";
pub const LOCATION: &str = "location";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";
pub const T2M_RANGE: &str = "t2m_range";
pub const DAY_OF_YEAR: &str = "day_of_year";

/// Column forecast by default.
pub const DEFAULT_TARGET: &str = "t2m_max";

/// The seventeen observation-table columns, in table order.
pub const OBSERVATION_COLUMNS: [&str; 17] = [
    DATE,
    LOCATION,
    LAT,
    LON,
    "t2m",
    "t2m_max",
    "t2m_min",
    T2M_RANGE,
    "dewpoint",
    "rh2m",
    "ws10m",
    "wd10m",
    "ps",
    "allsky_sw_dwn",
    "allsky_lw_dwn",
    "prectotcorr",
    DAY_OF_YEAR,
];

/// Column types of an observation table, in table order.
pub fn observation_schema() -> Schema {
    OBSERVATION_COLUMNS
        .iter()
        .map(|name| {
            let dtype = match *name {
                DATE => DataType::Date,
                LOCATION => DataType::String,
                DAY_OF_YEAR => DataType::Int32,
                _ => DataType::Float64,
            };
            Field::new((*name).into(), dtype)
        })
        .collect()
}

/// An observation table with no rows.
pub fn empty_observation_table() -> DataFrame {
    DataFrame::empty_with_schema(&observation_schema())
}

pub(crate) fn max_temperature() -> &'static str {
    PowerParameter::T2mMax.column_name()
}

pub(crate) fn min_temperature() -> &'static str {
    PowerParameter::T2mMin.column_name()
}
