use chrono::NaiveDate;
use polars::prelude::{Column, DataType, PolarsResult};
use std::io;
use std::path::Path;

fn unix_epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub(crate) fn to_epoch_days(date: NaiveDate) -> i32 {
    (date - unix_epoch()).num_days() as i32
}

pub(crate) fn from_epoch_days(days: i32) -> NaiveDate {
    unix_epoch() + chrono::Duration::days(days as i64)
}

/// Physical values of a `Date` column. Fails if the column holds anything else.
pub(crate) fn date_column_days(column: &Column) -> PolarsResult<Vec<Option<i32>>> {
    column.date()?;
    Ok(column.cast(&DataType::Int32)?.i32()?.into_iter().collect())
}

pub(crate) fn ensure_parent_dir_exists(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            if parent.is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Parent path exists but is not a directory: {}", parent.display()),
                ));
            }
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
