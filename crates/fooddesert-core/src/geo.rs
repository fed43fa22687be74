//! Internal geographic point.
//!
//! A [`GeoPoint`] is stored in planar axis order: `x` is longitude and `y` is
//! latitude, both in decimal degrees. External services that order their pairs
//! as (latitude, longitude) must convert through a dedicated adapter rather
//! than reaching into the fields positionally.

use serde::{Deserialize, Serialize};

/// A `(longitude, latitude)` point in decimal degrees. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "longitude")]
    x: f64,
    #[serde(rename = "latitude")]
    y: f64,
}

impl GeoPoint {
    /// Builds a point from its `x` (longitude) and `y` (latitude) components.
    ///
    /// No range check happens here; use [`GeoPoint::is_valid`] before handing
    /// the point to anything that requires a real location on Earth.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.y
    }

    /// Returns `true` when both components are finite and inside the
    /// WGS84 ranges: longitude in `[-180, 180]`, latitude in `[-90, 90]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (-180.0..=180.0).contains(&self.x)
            && (-90.0..=90.0).contains(&self.y)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT ({} {})", self.x, self.y)
    }
}
