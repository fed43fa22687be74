//! Google Places nearby search for grocery stores.
//!
//! [`NearbySearch`] drives the paginated query against any [`PlacesApi`]
//! implementation; [`PlacesClient`] is the HTTP one.

pub mod api;
pub mod client;
pub mod coords;
pub mod error;
pub mod nearby;
pub mod pause;
pub mod types;

pub use api::PlacesApi;
pub use client::PlacesClient;
pub use coords::{from_service, to_service};
pub use error::PlacesError;
pub use nearby::{NearbySearch, DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY, MAX_RADIUS_METERS};
pub use pause::{Pause, TokioPause};
pub use types::{LatLng, NearbySearchRequest, PlaceType, RawResult, SearchResponse};
