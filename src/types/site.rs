//! Geographic points and the labelled sites a training set is built from.

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use power_forecast::LatLon;
///
/// let chattanooga = LatLon(35.0456, -85.3097);
/// assert_eq!(chattanooga.0, 35.0456); // Latitude
/// assert_eq!(chattanooga.1, -85.3097); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

/// A named point. The name becomes the `location` column of every row
/// fetched for it and is what the forecast driver filters on.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub coordinate: LatLon,
}

impl Site {
    pub fn new(name: impl Into<String>, coordinate: LatLon) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}
