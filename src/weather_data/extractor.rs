//! Reshapes a POWER daily point response into an observation table.
//!
//! The response nests values as `properties.parameter.<CODE>.<YYYYMMDD>`. Rows
//! are keyed by the dates of the reference parameter (`T2M`) in the order the
//! response lists them, and every other parameter must report exactly the same
//! date set.

use crate::types::compact_date::CompactDate;
use crate::types::parameter::PowerParameter;
use crate::types::schema::{
    max_temperature, min_temperature, DATE, DAY_OF_YEAR, LAT, LOCATION, LON, OBSERVATION_COLUMNS,
    T2M_RANGE,
};
use crate::utils::to_epoch_days;
use crate::weather_data::error::FetchError;
use crate::weather_data::request::PointRequest;
use log::debug;
use polars::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

type DateValues = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct PowerResponse {
    #[serde(default)]
    header: Option<ResponseHeader>,
    properties: ResponseProperties,
}

#[derive(Debug, Deserialize)]
struct ResponseHeader {
    #[serde(default)]
    fill_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ResponseProperties {
    parameter: HashMap<String, DateValues>,
}

/// Parses a raw response body and builds the observation table for `request`.
///
/// With `mask_fill_values`, readings equal to the header's `fill_value` become
/// nulls. Otherwise every reading is kept verbatim.
pub fn observation_frame_from_slice(
    body: &[u8],
    request: &PointRequest,
    mask_fill_values: bool,
) -> Result<DataFrame, FetchError> {
    let response: PowerResponse = serde_json::from_slice(body)?;
    let fill_value = if mask_fill_values {
        response.header.as_ref().and_then(|h| h.fill_value)
    } else {
        None
    };
    build_observation_frame(&response.properties.parameter, request, fill_value)
}

fn build_observation_frame(
    parameters: &HashMap<String, DateValues>,
    request: &PointRequest,
    fill_value: Option<f64>,
) -> Result<DataFrame, FetchError> {
    let reference = parameter_values(parameters, PowerParameter::REFERENCE)?;
    let date_keys: Vec<&str> = reference.keys().map(String::as_str).collect();

    for parameter in PowerParameter::ALL {
        check_same_dates(parameter, &date_keys, parameter_values(parameters, parameter)?)?;
    }

    let epoch_days = date_keys
        .iter()
        .map(|key| {
            key.parse::<CompactDate>()
                .map(|d| to_epoch_days(d.date()))
                .map_err(|_| FetchError::InvalidDateKey(key.to_string()))
        })
        .collect::<Result<Vec<i32>, _>>()?;

    let height = date_keys.len();
    let mut columns = Vec::with_capacity(OBSERVATION_COLUMNS.len());
    columns.push(Column::new(DATE.into(), epoch_days).cast(&DataType::Date)?);
    columns.push(Column::new(
        LOCATION.into(),
        vec![request.location.as_str(); height],
    ));
    columns.push(Column::new(LAT.into(), vec![request.coordinate.lat(); height]));
    columns.push(Column::new(LON.into(), vec![request.coordinate.lon(); height]));

    for parameter in PowerParameter::ALL {
        let values = parameter_values(parameters, parameter)?;
        let readings = date_keys
            .iter()
            .map(|key| reading(parameter, key, values, fill_value))
            .collect::<Result<Vec<Option<f64>>, _>>()?;
        columns.push(Column::new(parameter.column_name().into(), readings));
    }

    let frame = DataFrame::new(columns)?
        .lazy()
        .with_columns([
            (col(max_temperature()) - col(min_temperature())).alias(T2M_RANGE),
            col(DATE)
                .dt()
                .ordinal_day()
                .cast(DataType::Int32)
                .alias(DAY_OF_YEAR),
        ])
        .select(
            OBSERVATION_COLUMNS
                .iter()
                .map(|name| col(*name))
                .collect::<Vec<_>>(),
        )
        .collect()?;

    debug!(
        "Built {} rows for '{}' from {} parameters",
        frame.height(),
        request.location,
        PowerParameter::ALL.len()
    );
    Ok(frame)
}

fn parameter_values(
    parameters: &HashMap<String, DateValues>,
    parameter: PowerParameter,
) -> Result<&DateValues, FetchError> {
    parameters
        .get(parameter.code())
        .ok_or_else(|| FetchError::MissingParameter(parameter.code().to_string()))
}

fn check_same_dates(
    parameter: PowerParameter,
    reference_keys: &[&str],
    values: &DateValues,
) -> Result<(), FetchError> {
    let reference: HashSet<&str> = reference_keys.iter().copied().collect();
    let missing: Vec<String> = reference_keys
        .iter()
        .filter(|key| !values.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let unexpected: Vec<String> = values
        .keys()
        .filter(|key| !reference.contains(key.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }
    Err(FetchError::DateSetMismatch {
        parameter: parameter.code().to_string(),
        missing,
        unexpected,
    })
}

fn reading(
    parameter: PowerParameter,
    key: &str,
    values: &DateValues,
    fill_value: Option<f64>,
) -> Result<Option<f64>, FetchError> {
    let value = values.get(key).ok_or_else(|| FetchError::DateSetMismatch {
        parameter: parameter.code().to_string(),
        missing: vec![key.to_string()],
        unexpected: Vec::new(),
    })?;

    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            let reading = number.as_f64().ok_or_else(|| non_numeric(parameter, key, value))?;
            Ok(match fill_value {
                Some(fill) if reading == fill => None,
                _ => Some(reading),
            })
        }
        other => Err(non_numeric(parameter, key, other)),
    }
}

fn non_numeric(parameter: PowerParameter, key: &str, value: &Value) -> FetchError {
    FetchError::NonNumericValue {
        parameter: parameter.code().to_string(),
        date: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::site::LatLon;
    use crate::utils::{date_column_days, from_epoch_days};
    use chrono::{Datelike, NaiveDate};
    use serde_json::json;

    /// A response with every parameter reporting the same dates. `T2M_MAX` is
    /// `20 + i` and `T2M_MIN` is `10 + i / 2` for the i-th date.
    pub(crate) fn synthetic_response(dates: &[&str]) -> Value {
        let mut parameter = Map::new();
        for p in PowerParameter::ALL {
            let mut values = Map::new();
            for (i, date) in dates.iter().enumerate() {
                let v = match p {
                    PowerParameter::T2mMax => 20.0 + i as f64,
                    PowerParameter::T2mMin => 10.0 + i as f64 / 2.0,
                    _ => 1.0 + i as f64,
                };
                values.insert(date.to_string(), json!(v));
            }
            parameter.insert(p.code().to_string(), Value::Object(values));
        }
        json!({
            "header": { "title": "NASA/POWER", "fill_value": -999.0 },
            "properties": { "parameter": parameter }
        })
    }

    fn request(start: &str, end: &str) -> PointRequest {
        PointRequest::new(
            "Chattanooga",
            LatLon(35.0456, -85.3097),
            start.parse().unwrap(),
            end.parse().unwrap(),
        )
        .unwrap()
    }

    fn frame_from(value: &Value, mask: bool) -> Result<DataFrame, FetchError> {
        let body = serde_json::to_vec(value).unwrap();
        observation_frame_from_slice(&body, &request("20200101", "20200105"), mask)
    }

    fn dates_of(frame: &DataFrame) -> Vec<NaiveDate> {
        date_column_days(frame.column(DATE).unwrap())
            .unwrap()
            .into_iter()
            .map(|d| from_epoch_days(d.unwrap()))
            .collect()
    }

    #[test]
    fn test_five_dates_yield_five_rows_in_schema_order() {
        let dates = ["20200101", "20200102", "20200103", "20200104", "20200105"];
        let frame = frame_from(&synthetic_response(&dates), false).unwrap();

        assert_eq!(frame.shape(), (5, 17));
        let names: Vec<&str> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, OBSERVATION_COLUMNS);
        assert_eq!(frame.column(DATE).unwrap().dtype(), &DataType::Date);

        let expected: Vec<NaiveDate> = (1..=5)
            .map(|d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap())
            .collect();
        assert_eq!(dates_of(&frame), expected);
    }

    #[test]
    fn test_range_is_max_minus_min() {
        let dates = ["20200101", "20200102", "20200103"];
        let frame = frame_from(&synthetic_response(&dates), false).unwrap();
        let max = frame.column("t2m_max").unwrap().f64().unwrap();
        let min = frame.column("t2m_min").unwrap().f64().unwrap();
        let range = frame.column(T2M_RANGE).unwrap().f64().unwrap();
        for i in 0..frame.height() {
            let expected = max.get(i).unwrap() - min.get(i).unwrap();
            assert!((range.get(i).unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_day_of_year_follows_leap_years() {
        let dates = ["20201231", "20210101", "20211231"];
        let frame = frame_from(&synthetic_response(&dates), false).unwrap();
        let ordinals: Vec<i32> = frame
            .column(DAY_OF_YEAR)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .map(Option::unwrap)
            .collect();
        assert_eq!(ordinals, vec![366, 1, 365]);
        for (date, ordinal) in dates_of(&frame).iter().zip(ordinals) {
            assert_eq!(date.ordinal() as i32, ordinal);
        }
    }

    #[test]
    fn test_constant_columns_match_request() {
        let dates = ["20200101", "20200102"];
        let frame = frame_from(&synthetic_response(&dates), false).unwrap();
        let location = frame.column(LOCATION).unwrap().str().unwrap();
        let lat = frame.column(LAT).unwrap().f64().unwrap();
        let lon = frame.column(LON).unwrap().f64().unwrap();
        for i in 0..frame.height() {
            assert_eq!(location.get(i), Some("Chattanooga"));
            assert_eq!(lat.get(i), Some(35.0456));
            assert_eq!(lon.get(i), Some(-85.3097));
        }
    }

    #[test]
    fn test_rows_keep_response_order() {
        let dates = ["20200103", "20200101", "20200102"];
        let frame = frame_from(&synthetic_response(&dates), false).unwrap();
        let days: Vec<u32> = dates_of(&frame).iter().map(|d| d.day()).collect();
        assert_eq!(days, vec![3, 1, 2]);
    }

    #[test]
    fn test_mismatched_date_sets_fail_fast() {
        let mut response = synthetic_response(&["20200101", "20200102"]);
        let rh = response["properties"]["parameter"]["RH2M"]
            .as_object_mut()
            .unwrap();
        rh.remove("20200102");
        rh.insert("20200109".to_string(), json!(3.0));

        match frame_from(&response, false) {
            Err(FetchError::DateSetMismatch {
                parameter,
                missing,
                unexpected,
            }) => {
                assert_eq!(parameter, "RH2M");
                assert_eq!(missing, vec!["20200102".to_string()]);
                assert_eq!(unexpected, vec!["20200109".to_string()]);
            }
            other => panic!("expected DateSetMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_parameter_is_reported_by_code() {
        let mut response = synthetic_response(&["20200101"]);
        response["properties"]["parameter"]
            .as_object_mut()
            .unwrap()
            .remove("PRECTOTCORR");
        assert!(matches!(
            frame_from(&response, false),
            Err(FetchError::MissingParameter(code)) if code == "PRECTOTCORR"
        ));
    }

    #[test]
    fn test_invalid_date_key_is_rejected() {
        let response = synthetic_response(&["2020-01-01"]);
        assert!(matches!(
            frame_from(&response, false),
            Err(FetchError::InvalidDateKey(key)) if key == "2020-01-01"
        ));
    }

    #[test]
    fn test_non_numeric_reading_is_rejected() {
        let mut response = synthetic_response(&["20200101"]);
        response["properties"]["parameter"]["PS"]["20200101"] = json!("n/a");
        assert!(matches!(
            frame_from(&response, false),
            Err(FetchError::NonNumericValue { parameter, .. }) if parameter == "PS"
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result =
            observation_frame_from_slice(b"{not json", &request("20200101", "20200101"), false);
        assert!(matches!(result, Err(FetchError::JsonParse(_))));
    }

    #[test]
    fn test_fill_values_are_kept_unless_masked() {
        let mut response = synthetic_response(&["20200101", "20200102"]);
        response["properties"]["parameter"]["T2M_MAX"]["20200102"] = json!(-999.0);

        let raw = frame_from(&response, false).unwrap();
        assert_eq!(raw.column("t2m_max").unwrap().f64().unwrap().get(1), Some(-999.0));

        let masked = frame_from(&response, true).unwrap();
        let max = masked.column("t2m_max").unwrap().f64().unwrap();
        assert_eq!(max.get(0), Some(20.0));
        assert_eq!(max.get(1), None);
        assert_eq!(masked.column(T2M_RANGE).unwrap().f64().unwrap().get(1), None);
    }

    #[test]
    fn test_empty_parameter_block_yields_empty_table() {
        let frame = frame_from(&synthetic_response(&[]), false).unwrap();
        assert_eq!(frame.shape(), (0, 17));
    }
}
