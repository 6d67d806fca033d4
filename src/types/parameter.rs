//! The daily NASA POWER parameters requested for every point, and the
//! observation-table column each one lands in.

use std::fmt;

/// One of the eleven daily parameters requested from the POWER point endpoint.
///
/// The declaration order is the order the codes appear in the request and the
/// order their columns appear in the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerParameter {
    /// Mean temperature at 2 m (°C).
    T2m,
    /// Maximum temperature at 2 m (°C).
    T2mMax,
    /// Minimum temperature at 2 m (°C).
    T2mMin,
    /// Dew/frost point at 2 m (°C).
    T2mDew,
    /// Relative humidity at 2 m (%).
    Rh2m,
    /// Wind speed at 10 m (m/s).
    Ws10m,
    /// Wind direction at 10 m (degrees).
    Wd10m,
    /// Surface pressure (kPa).
    Ps,
    /// All-sky surface shortwave downward irradiance (MJ/m²/day).
    AllskySwDown,
    /// All-sky surface longwave downward irradiance (MJ/m²/day).
    AllskyLwDown,
    /// Bias-corrected total precipitation (mm/day).
    PrecTotCorr,
}

impl PowerParameter {
    pub const ALL: [PowerParameter; 11] = [
        PowerParameter::T2m,
        PowerParameter::T2mMax,
        PowerParameter::T2mMin,
        PowerParameter::T2mDew,
        PowerParameter::Rh2m,
        PowerParameter::Ws10m,
        PowerParameter::Wd10m,
        PowerParameter::Ps,
        PowerParameter::AllskySwDown,
        PowerParameter::AllskyLwDown,
        PowerParameter::PrecTotCorr,
    ];

    /// The parameter whose date keys define the rows of a response.
    pub const REFERENCE: PowerParameter = PowerParameter::T2m;

    /// Parameter code as spelled by the API.
    pub fn code(&self) -> &'static str {
        match self {
            PowerParameter::T2m => "T2M",
            PowerParameter::T2mMax => "T2M_MAX",
            PowerParameter::T2mMin => "T2M_MIN",
            PowerParameter::T2mDew => "T2MDEW",
            PowerParameter::Rh2m => "RH2M",
            PowerParameter::Ws10m => "WS10M",
            PowerParameter::Wd10m => "WD10M",
            PowerParameter::Ps => "PS",
            PowerParameter::AllskySwDown => "ALLSKY_SFC_SW_DWN",
            PowerParameter::AllskyLwDown => "ALLSKY_SFC_LW_DWN",
            PowerParameter::PrecTotCorr => "PRECTOTCORR",
        }
    }

    /// Observation-table column holding this parameter.
    pub fn column_name(&self) -> &'static str {
        match self {
            PowerParameter::T2m => "t2m",
            PowerParameter::T2mMax => "t2m_max",
            PowerParameter::T2mMin => "t2m_min",
            PowerParameter::T2mDew => "dewpoint",
            PowerParameter::Rh2m => "rh2m",
            PowerParameter::Ws10m => "ws10m",
            PowerParameter::Wd10m => "wd10m",
            PowerParameter::Ps => "ps",
            PowerParameter::AllskySwDown => "allsky_sw_dwn",
            PowerParameter::AllskyLwDown => "allsky_lw_dwn",
            PowerParameter::PrecTotCorr => "prectotcorr",
        }
    }

    /// The `parameters` query value: every code, comma-joined, in request order.
    pub(crate) fn query_value() -> String {
        Self::ALL
            .iter()
            .map(PowerParameter::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a parameter as its API code.
///
/// ```
/// use power_forecast::PowerParameter;
///
/// assert_eq!(PowerParameter::T2mDew.to_string(), "T2MDEW");
/// ```
impl fmt::Display for PowerParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
