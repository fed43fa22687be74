use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A grocery store found by a nearby search.
///
/// Carries no identifier: a store only gets one once it is persisted, which
/// happens outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub location: GeoPoint,
}

impl Store {
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
