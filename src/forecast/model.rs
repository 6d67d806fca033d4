//! Fits a trend + seasonality model to a [`ModelSeries`] and forecasts it.
//!
//! The statistics come from `augurs`. With seasonal periods configured, the
//! series goes through an MSTL decomposition: the seasonal terms are
//! forecast by repetition and the deseasonalised remainder by AutoETS.
//! Without seasonal periods, AutoETS models the series directly. Both
//! paths produce in-sample fits and out-of-sample forecasts with prediction
//! intervals at the configured width.

use crate::forecast::config::ForecastConfig;
use crate::forecast::error::ForecastError;
use crate::forecast::series::ModelSeries;
use crate::forecast::table::ForecastTable;
use augurs::ets::AutoETS;
use augurs::mstl::MSTLModel;
use augurs::prelude::*;
use augurs::Forecast;
use log::{debug, info};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt::Display;

pub struct Forecaster {
    config: ForecastConfig,
}

/// A model fitted to one history, holding the fit over that history and the
/// forecast over the configured horizon.
pub struct FittedForecaster {
    history: ModelSeries,
    horizon_days: usize,
    in_sample: Bands,
    future: Bands,
}

struct Bands {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Result<Forecaster, ForecastError> {
        config.validate()?;
        Ok(Forecaster { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn fit(&self, series: &ModelSeries) -> Result<FittedForecaster, ForecastError> {
        let required = self.config.min_history()?;
        if series.len() < required {
            return Err(ForecastError::InsufficientHistory {
                required,
                found: series.len(),
            });
        }

        let periods = self.config.seasonal_periods()?;
        let level = self.config.interval_width;
        let horizon = self.config.horizon_days;
        debug!(
            "Fitting {} observations with seasonal periods {:?}, horizon {} days",
            series.len(),
            periods,
            horizon
        );

        let (in_sample, future) = if periods.is_empty() {
            let fitted = AutoETS::non_seasonal().fit(series.y()).map_err(model_error)?;
            predict_both(&fitted, horizon, level)?
        } else {
            let trend_model = AutoETS::non_seasonal().into_trend_model();
            let fitted = MSTLModel::new(periods, trend_model)
                .fit(series.y())
                .map_err(model_error)?;
            predict_both(&fitted, horizon, level)?
        };

        let in_sample = bands(in_sample, series.len())?;
        let future = bands(future, horizon)?;
        let (in_sample, future) = fill_missing_bands(in_sample, future, series.y(), level)?;

        info!(
            "Fitted model on {} days ({} to {})",
            series.len(),
            series.first_date(),
            series.last_date()
        );
        Ok(FittedForecaster {
            history: series.clone(),
            horizon_days: horizon,
            in_sample,
            future,
        })
    }
}

impl FittedForecaster {
    pub fn history(&self) -> &ModelSeries {
        &self.history
    }

    /// History dates plus `horizon_days` daily steps.
    pub fn future_dates(&self) -> Vec<chrono::NaiveDate> {
        self.history.extended_dates(self.horizon_days)
    }

    /// Central estimate and bounds for every date in [`Self::future_dates`],
    /// in-sample rows first.
    pub fn predict(&self) -> ForecastTable {
        let ds = self.future_dates();
        let join = |a: &[f64], b: &[f64]| a.iter().chain(b).copied().collect::<Vec<f64>>();
        ForecastTable::new(
            ds,
            join(&self.in_sample.point, &self.future.point),
            join(&self.in_sample.lower, &self.future.lower),
            join(&self.in_sample.upper, &self.future.upper),
            self.history.len(),
        )
    }
}

fn predict_both<P: Predict>(
    fitted: &P,
    horizon: usize,
    level: f64,
) -> Result<(Forecast, Forecast), ForecastError> {
    let in_sample = fitted.predict_in_sample(level).map_err(model_error)?;
    let future = fitted.predict(horizon, level).map_err(model_error)?;
    Ok((in_sample, future))
}

fn model_error(e: impl Display) -> ForecastError {
    ForecastError::Model(e.to_string())
}

fn bands(forecast: Forecast, expected: usize) -> Result<Bands, ForecastError> {
    if forecast.point.len() != expected {
        return Err(ForecastError::Model(format!(
            "model returned {} points, expected {}",
            forecast.point.len(),
            expected
        )));
    }
    let (lower, upper) = match forecast.intervals {
        Some(intervals) => (intervals.lower, intervals.upper),
        None => (vec![f64::NAN; expected], vec![f64::NAN; expected]),
    };
    Ok(Bands {
        point: forecast.point,
        lower,
        upper,
    })
}

/// Replaces absent or non-finite bounds with `point ± z·σ`, where σ is the
/// in-sample residual standard deviation and z the normal quantile for `level`.
fn fill_missing_bands(
    mut in_sample: Bands,
    mut future: Bands,
    observed: &[f64],
    level: f64,
) -> Result<(Bands, Bands), ForecastError> {
    let complete = |b: &Bands| {
        b.lower.iter().chain(&b.upper).all(|v| v.is_finite())
    };
    if complete(&in_sample) && complete(&future) {
        return Ok((in_sample, future));
    }

    let residuals: Vec<f64> = observed
        .iter()
        .zip(&in_sample.point)
        .map(|(y, yhat)| y - yhat)
        .filter(|r| r.is_finite())
        .collect();
    let sigma = if residuals.len() > 1 {
        let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
        let var = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (residuals.len() - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    let z = Normal::new(0.0, 1.0)
        .map_err(model_error)?
        .inverse_cdf(0.5 + level / 2.0);
    debug!("Filling missing interval bounds with ±{:.3}", z * sigma);

    for b in [&mut in_sample, &mut future] {
        for i in 0..b.point.len() {
            if !b.lower[i].is_finite() {
                b.lower[i] = b.point[i] - z * sigma;
            }
            if !b.upper[i].is_finite() {
                b.upper[i] = b.point[i] + z * sigma;
            }
        }
    }
    Ok((in_sample, future))
}
