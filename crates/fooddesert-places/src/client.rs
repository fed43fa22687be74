//! HTTP client for the Google Places Nearby Search endpoint.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and mapping of the JSON `"status"` field onto [`PlacesError::RemoteService`].
//! Requests are never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::api::PlacesApi;
use crate::error::PlacesError;
use crate::types::{NearbySearchEnvelope, NearbySearchRequest, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";

/// Client for the Places Nearby Search API.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. The client is cheap to share: the
/// connection pool and API key are read-only after construction.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fooddesert/0.1 (grocery-access)")
            .build()?;

        // Exactly one trailing slash, so joining the endpoint path appends to
        // the base instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(NEARBY_SEARCH_PATH))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Builds the request URL with the API key and percent-encoded parameters.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, parses the body, and
    /// checks the `"status"` field.
    ///
    /// `context` names the call in deserialization errors; the URL is never
    /// used for that because it carries the API key.
    async fn fetch_page(&self, url: Url, context: &str) -> Result<SearchResponse, PlacesError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: NearbySearchEnvelope =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Self::check_status(&envelope)?;

        Ok(SearchResponse::from(envelope))
    }

    /// `OK` and `ZERO_RESULTS` are successes; every other status is a
    /// rejection by the service.
    fn check_status(envelope: &NearbySearchEnvelope) -> Result<(), PlacesError> {
        match envelope.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(()),
            other => Err(PlacesError::RemoteService {
                status: other.to_owned(),
                message: envelope
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "no error message".to_owned()),
            }),
        }
    }
}

#[async_trait]
impl PlacesApi for PlacesClient {
    async fn search(&self, request: &NearbySearchRequest) -> Result<SearchResponse, PlacesError> {
        let location = request.origin.to_query_value();
        let radius = request.radius_meters.to_string();
        let url = self.build_url(&[
            ("location", &location),
            ("radius", &radius),
            ("type", request.place_type.as_str()),
        ]);
        self.fetch_page(url, &format!("nearbysearch(location={location})"))
            .await
    }

    async fn search_next_page(&self, token: &str) -> Result<SearchResponse, PlacesError> {
        let url = self.build_url(&[("pagetoken", token)]);
        self.fetch_page(url, "nearbysearch(pagetoken)").await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
