//! The boundary between the observation schema and the forecasting model.
//!
//! The model sees exactly two columns: `ds` (the date) and `y` (the value to
//! forecast). [`ModelSeries::from_frame`] is the only place observation columns
//! are renamed into that shape.

use crate::forecast::error::ForecastError;
use crate::utils::{date_column_days, from_epoch_days, to_epoch_days};
use chrono::NaiveDate;
use polars::prelude::*;

pub const DS: &str = "ds";
pub const Y: &str = "y";

/// A gap-free, strictly increasing daily series with no missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSeries {
    ds: Vec<NaiveDate>,
    y: Vec<f64>,
}

impl ModelSeries {
    pub fn new(ds: Vec<NaiveDate>, y: Vec<f64>) -> Result<Self, ForecastError> {
        if ds.len() != y.len() {
            return Err(ForecastError::LengthMismatch {
                dates: ds.len(),
                values: y.len(),
            });
        }
        if ds.is_empty() {
            return Err(ForecastError::EmptySeries);
        }
        if let Some((date, _)) = ds.iter().zip(&y).find(|(_, v)| !v.is_finite()) {
            return Err(ForecastError::MissingTarget { date: *date });
        }
        for pair in ds.windows(2) {
            let (previous, next) = (pair[0], pair[1]);
            match (next - previous).num_days() {
                1 => {}
                d if d <= 0 => return Err(ForecastError::NonIncreasingDates { previous, next }),
                _ => return Err(ForecastError::IrregularSpacing { previous, next }),
            }
        }
        Ok(Self { ds, y })
    }

    /// Adapts an observation table: `date_column` becomes `ds`, `target_column`
    /// becomes `y`. Rows must already be sorted by date.
    pub fn from_frame(
        frame: &DataFrame,
        date_column: &str,
        target_column: &str,
    ) -> Result<Self, ForecastError> {
        for name in [date_column, target_column] {
            if frame.column(name).is_err() {
                return Err(ForecastError::MissingColumn(name.to_string()));
            }
        }
        let dtype = frame.column(date_column)?.dtype();
        if dtype != &DataType::Date {
            return Err(ForecastError::DateColumnType {
                column: date_column.to_string(),
                dtype: dtype.to_string(),
            });
        }

        let model_frame = frame
            .clone()
            .lazy()
            .select([
                col(date_column).alias(DS),
                col(target_column).cast(DataType::Float64).alias(Y),
            ])
            .collect()?;
        Self::from_model_frame(&model_frame)
    }

    /// Reads a frame that already has `ds` (Date) and `y` columns.
    pub fn from_model_frame(frame: &DataFrame) -> Result<Self, ForecastError> {
        let days = date_column_days(frame.column(DS)?)?;
        let values = frame.column(Y)?.cast(&DataType::Float64)?;

        let mut ds = Vec::with_capacity(days.len());
        for (index, day) in days.into_iter().enumerate() {
            ds.push(from_epoch_days(day.ok_or(ForecastError::MissingDate { index })?));
        }
        let mut y = Vec::with_capacity(ds.len());
        for (date, value) in ds.iter().zip(values.f64()?.into_iter()) {
            y.push(value.ok_or(ForecastError::MissingTarget { date: *date })?);
        }
        Self::new(ds, y)
    }

    /// The two-column `ds`/`y` frame the model consumes.
    pub fn to_frame(&self) -> Result<DataFrame, ForecastError> {
        let days: Vec<i32> = self.ds.iter().map(|d| to_epoch_days(*d)).collect();
        Ok(DataFrame::new(vec![
            Column::new(DS.into(), days).cast(&DataType::Date)?,
            Column::new(Y.into(), self.y.clone()),
        ])?)
    }

    pub fn ds(&self) -> &[NaiveDate] {
        &self.ds
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.ds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ds.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.ds[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.ds[self.ds.len() - 1]
    }

    /// The history's dates followed by `periods` further daily steps.
    pub fn extended_dates(&self, periods: usize) -> Vec<NaiveDate> {
        let last = self.last_date();
        self.ds
            .iter()
            .copied()
            .chain((1..=periods as i64).map(|step| last + chrono::Duration::days(step)))
            .collect()
    }
}
