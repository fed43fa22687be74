//! Paginated nearby grocery search.
//!
//! [`NearbySearch::nearby_query`] issues the first request, then follows
//! continuation tokens one page at a time with a fixed pause before each
//! follow-up request, folding every page into a single `Vec<Store>`.
//!
//! A query takes several seconds when the service returns more than one page
//! (up to three requests plus two two-second pauses). Await it from a worker
//! task, never from a latency-sensitive context.

use std::time::Duration;

use fooddesert_core::{GeoPoint, Store};

use crate::api::PlacesApi;
use crate::coords::{from_service, to_service};
use crate::error::PlacesError;
use crate::pause::Pause;
use crate::types::{NearbySearchRequest, SearchResponse};

/// Wait the Places API requires before a `pagetoken` becomes valid.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// The Places API documents at most 3 pages of 20 results per search.
pub const DEFAULT_MAX_PAGES: usize = 3;

/// Largest radius the Nearby Search endpoint accepts.
pub const MAX_RADIUS_METERS: u32 = 50_000;

const RESULTS_PER_PAGE: usize = 20;

/// Where the next page comes from.
enum Cursor {
    Initial(NearbySearchRequest),
    Continuation(String),
}

/// Orchestrates a nearby search against a [`PlacesApi`].
///
/// Holds no per-call state, so one instance can serve concurrent queries.
pub struct NearbySearch<A, P> {
    api: A,
    pause: P,
    page_delay: Duration,
    max_pages: usize,
}

impl<A, P> NearbySearch<A, P>
where
    A: PlacesApi,
    P: Pause,
{
    pub fn new(api: A, pause: P) -> Self {
        Self {
            api,
            pause,
            page_delay: DEFAULT_PAGE_DELAY,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Caps the number of pages fetched per query. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Finds grocery stores within `radius_meters` of `origin`.
    ///
    /// Stores come back in the order the service returned them: page by
    /// page, and in response order within each page. Nothing is sorted or
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidRadius`] if `radius_meters` is 0 or above
    ///   [`MAX_RADIUS_METERS`].
    /// - [`PlacesError::InvalidOrigin`] if `origin` is not a real coordinate.
    /// - [`PlacesError::RemoteService`] or [`PlacesError::Transport`] from any
    ///   page request.
    /// - [`PlacesError::Interrupted`] if a pause between pages is cut short.
    /// - [`PlacesError::ProtocolViolation`] if the service still offers a
    ///   continuation token on the last allowed page.
    ///
    /// Any error discards the stores gathered from earlier pages.
    pub async fn nearby_query(
        &self,
        origin: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Store>, PlacesError> {
        if radius_meters == 0 || radius_meters > MAX_RADIUS_METERS {
            return Err(PlacesError::InvalidRadius {
                radius_meters,
                max: MAX_RADIUS_METERS,
            });
        }
        if !origin.is_valid() {
            return Err(PlacesError::InvalidOrigin {
                x: origin.x(),
                y: origin.y(),
            });
        }

        let mut stores = Vec::with_capacity(DEFAULT_MAX_PAGES * RESULTS_PER_PAGE);
        let mut cursor = Cursor::Initial(NearbySearchRequest::grocery(
            to_service(origin),
            radius_meters,
        ));

        for page in 1..=self.max_pages {
            let response = self.fetch(cursor, page).await?;
            let page_len = response.results.len();

            stores.extend(
                response
                    .results
                    .into_iter()
                    .map(|raw| Store::new(raw.name, from_service(raw.location))),
            );

            match response.next_page_token {
                None => {
                    tracing::debug!(
                        pages = page,
                        stores = stores.len(),
                        "nearby search complete"
                    );
                    return Ok(stores);
                }
                Some(token) => {
                    tracing::debug!(page, results = page_len, "more pages available");
                    cursor = Cursor::Continuation(token);
                }
            }
        }

        tracing::warn!(
            max_pages = self.max_pages,
            "Places API returned a continuation token past the page limit"
        );
        Err(PlacesError::ProtocolViolation {
            max_pages: self.max_pages,
        })
    }

    /// Fetches one page. Continuation requests wait out the page delay first.
    async fn fetch(&self, cursor: Cursor, page: usize) -> Result<SearchResponse, PlacesError> {
        match cursor {
            Cursor::Initial(request) => {
                tracing::debug!(
                    lat = request.origin.lat,
                    lng = request.origin.lng,
                    radius_meters = request.radius_meters,
                    place_type = %request.place_type,
                    "requesting first page"
                );
                self.api.search(&request).await
            }
            Cursor::Continuation(token) => {
                tracing::debug!(page, delay = ?self.page_delay, "pausing before next page");
                self.pause.pause(self.page_delay).await?;
                self.api.search_next_page(&token).await
            }
        }
    }
}

#[cfg(test)]
#[path = "nearby_test.rs"]
mod tests;
