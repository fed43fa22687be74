//! Conversion between [`GeoPoint`] (`x` = longitude, `y` = latitude) and the
//! Places API's [`LatLng`] (latitude first).
//!
//! Every crossing between the two conventions goes through this pair of
//! functions. Do not build a `LatLng` from a `GeoPoint` anywhere else.

use fooddesert_core::GeoPoint;

use crate::types::LatLng;

#[must_use]
pub fn to_service(p: GeoPoint) -> LatLng {
    LatLng {
        lat: p.y(),
        lng: p.x(),
    }
}

#[must_use]
pub fn from_service(s: LatLng) -> GeoPoint {
    GeoPoint::new(s.lng, s.lat)
}

impl From<GeoPoint> for LatLng {
    fn from(p: GeoPoint) -> Self {
        to_service(p)
    }
}

impl From<LatLng> for GeoPoint {
    fn from(s: LatLng) -> Self {
        from_service(s)
    }
}
