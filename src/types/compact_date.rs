//! The compact `YYYYMMDD` date form used by the NASA POWER API, both in the
//! `start`/`end` query parameters and as the keys of every parameter mapping
//! in a response.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

const COMPACT_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid YYYYMMDD date")]
pub struct CompactDateError(pub String);

/// A calendar date that prints and parses as eight digits, `YYYYMMDD`.
///
/// # Examples
///
/// ```
/// use power_forecast::CompactDate;
/// use chrono::NaiveDate;
///
/// let start: CompactDate = "20200101".parse().unwrap();
/// assert_eq!(start.date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
/// assert_eq!(start.to_string(), "20200101");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct CompactDate(NaiveDate);

impl CompactDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// 1-indexed ordinal day within the calendar year.
    pub fn day_of_year(self) -> u32 {
        self.0.ordinal()
    }
}

impl FromStr for CompactDate {
    type Err = CompactDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts fewer than eight digits for %Y, the API never does.
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CompactDateError(s.to_string()));
        }
        NaiveDate::parse_from_str(s, COMPACT_FORMAT)
            .map(Self)
            .map_err(|_| CompactDateError(s.to_string()))
    }
}

impl TryFrom<&str> for CompactDate {
    type Error = CompactDateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NaiveDate> for CompactDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CompactDate> for NaiveDate {
    fn from(date: CompactDate) -> Self {
        date.0
    }
}

impl Display for CompactDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(COMPACT_FORMAT))
    }
}
