use crate::types::compact_date::CompactDate;
use crate::types::parameter::PowerParameter;
use crate::types::site::LatLon;
use crate::weather_data::error::FetchError;
use bon::Builder;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
pub const DEFAULT_COMMUNITY: &str = "AG";

/// Settings shared by every request a [`crate::NasaPower`] client makes.
///
/// ```
/// use power_forecast::FetchConfig;
/// use std::time::Duration;
///
/// let config = FetchConfig::builder()
///     .timeout(Duration::from_secs(60))
///     .mask_fill_values(true)
///     .build();
/// assert_eq!(config.community, "AG");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct FetchConfig {
    /// Daily point endpoint. Overridden in tests to point at a local stub.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// POWER user community, which selects units. `AG` is agroclimatology.
    #[builder(into, default = DEFAULT_COMMUNITY.to_string())]
    pub community: String,
    /// Request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
    /// Replace readings equal to the response's fill value (-999) with nulls.
    #[builder(default)]
    pub mask_fill_values: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// One point, one inclusive date range, one label.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRequest {
    pub location: String,
    pub coordinate: LatLon,
    pub start: CompactDate,
    pub end: CompactDate,
}

impl PointRequest {
    pub fn new(
        location: impl Into<String>,
        coordinate: LatLon,
        start: CompactDate,
        end: CompactDate,
    ) -> Result<Self, FetchError> {
        if start > end {
            return Err(FetchError::InvalidDateRange { start, end });
        }
        Ok(Self {
            location: location.into(),
            coordinate,
            start,
            end,
        })
    }

    pub(crate) fn query_pairs(&self, community: &str) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.coordinate.lat().to_string()),
            ("longitude", self.coordinate.lon().to_string()),
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
            ("format", "JSON".to_string()),
            ("community", community.to_string()),
            ("parameters", PowerParameter::query_value()),
        ]
    }
}
