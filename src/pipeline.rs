//! The forecast driver: stored table in, forecast (and optionally a chart) out.

use crate::chart::{render, ChartTarget};
use crate::dataset::filtering::select_location;
use crate::dataset::store::{default_train_path, read_table};
use crate::error::PowerError;
use crate::forecast::config::ForecastConfig;
use crate::forecast::model::Forecaster;
use crate::forecast::series::ModelSeries;
use crate::forecast::table::ForecastTable;
use crate::types::schema::{DATE, DEFAULT_TARGET};
use bon::builder;
use log::info;
use std::path::PathBuf;

/// One location's history and the forecast fitted to it.
#[derive(Debug, Clone)]
pub struct LocationForecast {
    pub location: String,
    pub target: String,
    pub history: ModelSeries,
    pub forecast: ForecastTable,
}

/// Loads the stored observation table, keeps one location, fits the
/// configured model to one column and predicts over the history plus the
/// horizon.
///
/// * `.location(&str)`: **Required.** Value of the `location` column to forecast.
/// * `.dataset(PathBuf)`: Optional. Defaults to `data/weather_train.parquet`.
/// * `.target(&str)`: Optional. Column to forecast. Defaults to `t2m_max`.
/// * `.config(ForecastConfig)`: Optional. Defaults to yearly seasonality and a 730-day horizon.
/// * `.chart(ChartTarget)`: Optional. Renders the band chart when set.
///
/// Any failure aborts the run. Nothing is rendered for a failed fit.
///
/// ```rust,no_run
/// # use power_forecast::{forecast_location, ChartTarget, PowerError};
/// # fn main() -> Result<(), PowerError> {
/// let result = forecast_location()
///     .location("Chattanooga")
///     .chart(ChartTarget::Html("forecast.html".into()))
///     .call()?;
/// println!("{} forecast rows", result.forecast.len());
/// # Ok(())
/// # }
/// ```
#[builder]
pub fn forecast_location(
    location: &str,
    dataset: Option<PathBuf>,
    target: Option<&str>,
    config: Option<ForecastConfig>,
    chart: Option<ChartTarget>,
) -> Result<LocationForecast, PowerError> {
    let dataset = dataset.unwrap_or_else(default_train_path);
    let target = target.unwrap_or(DEFAULT_TARGET);
    let forecaster = Forecaster::new(config.unwrap_or_default())?;

    let table = read_table(&dataset)?;
    let selected = select_location(&table, location)?;
    let history = ModelSeries::from_frame(&selected, DATE, target)?;

    let forecast = forecaster.fit(&history)?.predict();
    info!(
        "Forecast '{}' for '{}': {} history rows, {} forecast rows",
        target,
        location,
        forecast.history_len(),
        forecast.len() - forecast.history_len()
    );

    if let Some(chart) = chart {
        render(&forecast, &format!("{target} at {location}"), &chart)?;
    }

    Ok(LocationForecast {
        location: location.to_string(),
        target: target.to_string(),
        history,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::error::DatasetError;
    use crate::dataset::store::write_table;
    use crate::forecast::error::ForecastError;
    use crate::types::schema::LOCATION;
    use crate::utils::to_epoch_days;
    use chrono::NaiveDate;
    use polars::prelude::*;
    use std::path::Path;

    /// `days` of a gently warming yearly cycle for each location.
    fn write_training_table(path: &Path, locations: &[&str], days: usize) {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let mut dates = Vec::new();
        let mut names = Vec::new();
        let mut t2m_max = Vec::new();
        for (offset, location) in locations.iter().enumerate() {
            for t in 0..days {
                dates.push(to_epoch_days(start + chrono::Duration::days(t as i64)));
                names.push(*location);
                let t = t as f64;
                t2m_max.push(
                    15.0 + offset as f64
                        + 0.002 * t
                        + 10.0 * (2.0 * std::f64::consts::PI * t / 365.0).sin(),
                );
            }
        }
        let mut frame = DataFrame::new(vec![
            Column::new(DATE.into(), dates).cast(&DataType::Date).unwrap(),
            Column::new(LOCATION.into(), names),
            Column::new(DEFAULT_TARGET.into(), t2m_max),
        ])
        .unwrap();
        write_table(&mut frame, path).unwrap();
    }

    #[test]
    fn test_forecasts_one_location_from_stored_table() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("weather_train.parquet");
        let chart = dir.path().join("forecast.html");
        write_training_table(&dataset, &["Chattanooga", "Denver"], 800);

        let result = forecast_location()
            .location("Denver")
            .dataset(dataset)
            .chart(ChartTarget::Html(chart.clone()))
            .call()
            .unwrap();

        assert_eq!(result.history.len(), 800);
        assert_eq!(result.forecast.len(), 800 + 730);
        assert_eq!(result.target, DEFAULT_TARGET);
        assert!(chart.exists());
    }

    #[test]
    fn test_short_horizon_without_seasonality() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("weather_train.csv");
        write_training_table(&dataset, &["Chattanooga"], 40);

        let config = ForecastConfig::builder()
            .yearly_seasonality(false)
            .horizon_days(7)
            .build();
        let result = forecast_location()
            .location("Chattanooga")
            .dataset(dataset)
            .config(config)
            .call()
            .unwrap();
        assert_eq!(result.forecast.len(), 47);
    }

    #[test]
    fn test_unknown_location_fails_before_fitting() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("weather_train.parquet");
        write_training_table(&dataset, &["Chattanooga"], 20);

        let result = forecast_location()
            .location("Atlantis")
            .dataset(dataset)
            .call();
        assert!(matches!(
            result,
            Err(PowerError::Dataset(DatasetError::LocationNotFound { .. }))
        ));
    }

    #[test]
    fn test_missing_dataset_is_reported() {
        let result = forecast_location()
            .location("Chattanooga")
            .dataset(PathBuf::from("no/such/weather_train.parquet"))
            .call();
        assert!(matches!(result, Err(PowerError::Dataset(DatasetError::Open(..)))));
    }

    #[test]
    fn test_short_history_is_rejected_for_yearly_model() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("weather_train.parquet");
        write_training_table(&dataset, &["Chattanooga"], 100);

        let result = forecast_location()
            .location("Chattanooga")
            .dataset(dataset)
            .call();
        assert!(matches!(
            result,
            Err(PowerError::Forecast(ForecastError::InsufficientHistory { .. }))
        ));
    }
}
