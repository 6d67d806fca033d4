use crate::forecast::error::ForecastError;
use bon::Builder;

/// Two years of daily steps past the end of the history.
pub const DEFAULT_HORIZON_DAYS: usize = 730;
pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.8;

pub const YEARLY_PERIOD: usize = 365;
pub const WEEKLY_PERIOD: usize = 7;

/// Shortest history accepted when no seasonal term is enabled.
pub const MIN_TREND_OBSERVATIONS: usize = 10;

/// Everything that shapes a forecast, spelled out rather than left to
/// library defaults.
///
/// ```
/// use power_forecast::ForecastConfig;
///
/// let config = ForecastConfig::default();
/// assert!(config.yearly_seasonality);
/// assert!(!config.weekly_seasonality);
/// assert!(!config.daily_seasonality);
/// assert_eq!(config.horizon_days, 730);
///
/// let short = ForecastConfig::builder().horizon_days(90).interval_width(0.95).build();
/// assert_eq!(short.horizon_days, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ForecastConfig {
    #[builder(default = true)]
    pub yearly_seasonality: bool,
    #[builder(default)]
    pub weekly_seasonality: bool,
    /// Intra-day cycle. Must stay off for daily-resolution series.
    #[builder(default)]
    pub daily_seasonality: bool,
    /// Daily steps forecast past the last observed date.
    #[builder(default = DEFAULT_HORIZON_DAYS)]
    pub horizon_days: usize,
    /// Coverage of the uncertainty band, e.g. 0.8 for an 80% interval.
    #[builder(default = DEFAULT_INTERVAL_WIDTH)]
    pub interval_width: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidIntervalWidth(self.interval_width));
        }
        self.seasonal_periods().map(|_| ())
    }

    /// Seasonal periods, in days and ascending, handed to the decomposition.
    pub fn seasonal_periods(&self) -> Result<Vec<usize>, ForecastError> {
        if self.daily_seasonality {
            return Err(ForecastError::UnsupportedSeasonality("Daily"));
        }
        let mut periods = Vec::new();
        if self.weekly_seasonality {
            periods.push(WEEKLY_PERIOD);
        }
        if self.yearly_seasonality {
            periods.push(YEARLY_PERIOD);
        }
        Ok(periods)
    }

    /// Observations needed to fit: two full cycles of the longest period.
    pub fn min_history(&self) -> Result<usize, ForecastError> {
        Ok(self
            .seasonal_periods()?
            .into_iter()
            .max()
            .map_or(MIN_TREND_OBSERVATIONS, |p| (2 * p).max(MIN_TREND_OBSERVATIONS)))
    }
}
