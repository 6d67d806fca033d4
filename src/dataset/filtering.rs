//! Row selection over observation tables: one location, one side of a cutoff
//! date, plus the date diagnostics reported when a location is selected.

use crate::dataset::error::DatasetError;
use crate::types::compact_date::CompactDate;
use crate::types::schema::{DATE, LOCATION};
use crate::utils::{date_column_days, from_epoch_days, to_epoch_days};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Restricts `frame` to the rows of `location`, with the `date` column coerced
/// to a real date and rows sorted by date ascending.
///
/// An absent location is an error rather than an empty table. Duplicated or
/// missing dates are reported with `warn!` but not rejected here.
pub fn select_location(frame: &DataFrame, location: &str) -> Result<DataFrame, DatasetError> {
    require_columns(frame, &[LOCATION, DATE])?;

    let selected = frame
        .clone()
        .lazy()
        .filter(col(LOCATION).eq(lit(location)))
        .collect()?;

    if selected.height() == 0 {
        return Err(DatasetError::LocationNotFound {
            location: location.to_string(),
            available: available_locations(frame)?,
        });
    }

    let selected = coerce_date_column(selected, DATE)?
        .sort([DATE], SortMultipleOptions::default())?;

    let duplicates = duplicate_dates(&selected)?;
    if duplicates > 0 {
        warn!("{} duplicated dates for '{}'", duplicates, location);
    }
    let missing = missing_dates(&selected)?;
    if missing > 0 {
        warn!("{} calendar days missing for '{}'", missing, location);
    }

    info!("Selected {} rows for '{}'", selected.height(), location);
    Ok(selected)
}

/// Distinct values of the `location` column, sorted.
pub fn available_locations(frame: &DataFrame) -> Result<Vec<String>, DatasetError> {
    require_columns(frame, &[LOCATION])?;
    let locations: BTreeSet<String> = frame
        .column(LOCATION)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    Ok(locations.into_iter().collect())
}

/// Makes `column` a polars `Date`.
///
/// Datetimes are truncated to their date. Strings may be `YYYY-MM-DD`,
/// `YYYYMMDD` or an ISO datetime. Nulls stay null.
pub fn coerce_date_column(mut frame: DataFrame, column: &str) -> Result<DataFrame, DatasetError> {
    require_columns(&frame, &[column])?;
    let dtype = frame.column(column)?.dtype().clone();

    match dtype {
        DataType::Date => Ok(frame),
        DataType::Datetime(_, _) => {
            debug!("Casting datetime column '{}' to date", column);
            Ok(frame
                .lazy()
                .with_column(col(column).cast(DataType::Date))
                .collect()?)
        }
        DataType::String => {
            debug!("Parsing string column '{}' as dates", column);
            let epoch_days = frame
                .column(column)?
                .str()?
                .into_iter()
                .map(|value| match value {
                    None => Ok(None),
                    Some(text) => parse_date_text(text)
                        .map(|d| Some(to_epoch_days(d)))
                        .ok_or_else(|| DatasetError::DateCoercion {
                            column: column.to_string(),
                            value: text.to_string(),
                        }),
                })
                .collect::<Result<Vec<Option<i32>>, _>>()?;
            frame.with_column(Column::new(column.into(), epoch_days).cast(&DataType::Date)?)?;
            Ok(frame)
        }
        other => Err(DatasetError::UnsupportedDateType {
            column: column.to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = text.parse::<CompactDate>() {
        return Some(date.date());
    }
    // "2020-01-01T00:00:00" and "2020-01-01 00:00:00"
    match text.as_bytes().get(10) {
        Some(b'T') | Some(b' ') => NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Rows whose date repeats an earlier row's date. Expects a single location.
pub fn duplicate_dates(frame: &DataFrame) -> Result<usize, DatasetError> {
    let dates = distinct_epoch_days(frame)?;
    Ok(frame.column(DATE)?.len() - frame.column(DATE)?.null_count() - dates.len())
}

/// Calendar days between the first and last date that have no row.
pub fn missing_dates(frame: &DataFrame) -> Result<usize, DatasetError> {
    let dates = distinct_epoch_days(frame)?;
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => Ok((last - first + 1) as usize - dates.len()),
        _ => Ok(0),
    }
}

fn distinct_epoch_days(frame: &DataFrame) -> Result<BTreeSet<i32>, DatasetError> {
    require_columns(frame, &[DATE])?;
    Ok(date_column_days(frame.column(DATE)?)?
        .into_iter()
        .flatten()
        .collect())
}

/// Splits into rows dated strictly before `cutoff` and rows on or after it.
pub fn split_at(
    frame: &DataFrame,
    cutoff: NaiveDate,
) -> Result<(DataFrame, DataFrame), DatasetError> {
    let frame = coerce_date_column(frame.clone(), DATE)?;
    let cutoff_expr = || lit(to_epoch_days(cutoff)).cast(DataType::Date);
    let before = frame
        .clone()
        .lazy()
        .filter(col(DATE).lt(cutoff_expr()))
        .collect()?;
    let after = frame
        .lazy()
        .filter(col(DATE).gt_eq(cutoff_expr()))
        .collect()?;
    debug!(
        "Split at {}: {} rows before, {} rows on or after",
        cutoff,
        before.height(),
        after.height()
    );
    Ok((before, after))
}

/// First and last date of the table, if it has any dated rows.
pub fn date_span(frame: &DataFrame) -> Result<Option<(NaiveDate, NaiveDate)>, DatasetError> {
    let dates = distinct_epoch_days(frame)?;
    Ok(match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => Some((from_epoch_days(*first), from_epoch_days(*last))),
        _ => None,
    })
}

fn require_columns(frame: &DataFrame, columns: &[&str]) -> Result<(), DatasetError> {
    for name in columns {
        if frame.column(name).is_err() {
            return Err(DatasetError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}
