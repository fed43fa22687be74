//! Places Nearby Search request and response types.
//!
//! The wire types (`NearbySearchEnvelope`, `PlaceResult`, `Geometry`) model
//! the JSON body returned by `place/nearbysearch/json`. They are flattened into
//! [`SearchResponse`] before leaving the client so the orchestrator never sees
//! the envelope.

use serde::{Deserialize, Serialize};

/// A coordinate pair as the Places API orders it: latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Formats the pair as the `location` query parameter expects: `"lat,lng"`.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// Place categories accepted by the `type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceType {
    GroceryOrSupermarket,
}

impl PlaceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlaceType::GroceryOrSupermarket => "grocery_or_supermarket",
        }
    }
}

impl std::fmt::Display for PlaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first-page query of a nearby search. Built once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest {
    pub origin: LatLng,
    pub radius_meters: u32,
    pub place_type: PlaceType,
}

impl NearbySearchRequest {
    /// A request restricted to grocery stores and supermarkets.
    #[must_use]
    pub const fn grocery(origin: LatLng, radius_meters: u32) -> Self {
        Self {
            origin,
            radius_meters,
            place_type: PlaceType::GroceryOrSupermarket,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<RawResult>,
    pub next_page_token: Option<String>,
}

/// A single place as returned by one page of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult {
    pub name: String,
    pub location: LatLng,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Top-level body of a `nearbysearch/json` response.
///
/// `status` is `"OK"` or `"ZERO_RESULTS"` on success; anything else carries an
/// optional human-readable `error_message`.
#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchEnvelope {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceResult {
    pub name: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

impl From<NearbySearchEnvelope> for SearchResponse {
    fn from(envelope: NearbySearchEnvelope) -> Self {
        let results = envelope
            .results
            .into_iter()
            .map(|place| RawResult {
                name: place.name,
                location: place.geometry.location,
            })
            .collect();

        // An empty token means the same as an absent one.
        let next_page_token = envelope.next_page_token.filter(|t| !t.is_empty());

        Self {
            results,
            next_page_token,
        }
    }
}
