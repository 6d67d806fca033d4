use crate::forecast::error::ForecastError;
use crate::forecast::series::{ModelSeries, DS};
use crate::utils::to_epoch_days;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;

pub const YHAT: &str = "yhat";
pub const YHAT_LOWER: &str = "yhat_lower";
pub const YHAT_UPPER: &str = "yhat_upper";

/// Central estimate and uncertainty bounds for every date of an extended
/// range: the fitted history first, then the forecast horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    ds: Vec<NaiveDate>,
    yhat: Vec<f64>,
    yhat_lower: Vec<f64>,
    yhat_upper: Vec<f64>,
    history_len: usize,
}

/// How well a forecast matched held-out observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastScore {
    pub mae: f64,
    pub rmse: f64,
    /// Share of observations inside `[yhat_lower, yhat_upper]`.
    pub coverage: f64,
    /// Observations with a forecast on the same date.
    pub matched: usize,
}

impl ForecastTable {
    pub(crate) fn new(
        ds: Vec<NaiveDate>,
        yhat: Vec<f64>,
        yhat_lower: Vec<f64>,
        yhat_upper: Vec<f64>,
        history_len: usize,
    ) -> Self {
        Self {
            ds,
            yhat,
            yhat_lower,
            yhat_upper,
            history_len,
        }
    }

    pub fn ds(&self) -> &[NaiveDate] {
        &self.ds
    }

    pub fn yhat(&self) -> &[f64] {
        &self.yhat
    }

    pub fn yhat_lower(&self) -> &[f64] {
        &self.yhat_lower
    }

    pub fn yhat_upper(&self) -> &[f64] {
        &self.yhat_upper
    }

    pub fn len(&self) -> usize {
        self.ds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ds.is_empty()
    }

    /// Rows covering the fitted history. The rest are forecast.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// `ds`, `yhat`, `yhat_lower`, `yhat_upper`.
    pub fn to_frame(&self) -> Result<DataFrame, ForecastError> {
        let days: Vec<i32> = self.ds.iter().map(|d| to_epoch_days(*d)).collect();
        Ok(DataFrame::new(vec![
            Column::new(DS.into(), days).cast(&DataType::Date)?,
            Column::new(YHAT.into(), self.yhat.clone()),
            Column::new(YHAT_LOWER.into(), self.yhat_lower.clone()),
            Column::new(YHAT_UPPER.into(), self.yhat_upper.clone()),
        ])?)
    }

    /// Scores the forecast against `actual` on the dates both share.
    pub fn score(&self, actual: &ModelSeries) -> Result<ForecastScore, ForecastError> {
        let index: HashMap<NaiveDate, usize> =
            self.ds.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        let mut covered = 0usize;
        let mut matched = 0usize;
        for (date, y) in actual.ds().iter().zip(actual.y()) {
            let Some(&i) = index.get(date) else {
                continue;
            };
            let error = y - self.yhat[i];
            abs_sum += error.abs();
            sq_sum += error * error;
            if (self.yhat_lower[i]..=self.yhat_upper[i]).contains(y) {
                covered += 1;
            }
            matched += 1;
        }

        if matched == 0 {
            return Err(ForecastError::NoOverlap);
        }
        let n = matched as f64;
        Ok(ForecastScore {
            mae: abs_sum / n,
            rmse: (sq_sum / n).sqrt(),
            coverage: covered as f64 / n,
            matched,
        })
    }
}
