use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PlacesError;
use crate::types::{NearbySearchRequest, SearchResponse};

/// The remote nearby search service.
///
/// Implementations return one page per call and never retry. [`PlacesClient`]
/// is the HTTP implementation; tests substitute scripted fakes.
///
/// [`PlacesClient`]: crate::PlacesClient
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Fetches the first page for `request`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RemoteService`] if the service rejects the request.
    /// - [`PlacesError::Transport`] on network failure.
    async fn search(&self, request: &NearbySearchRequest) -> Result<SearchResponse, PlacesError>;

    /// Fetches the page identified by a continuation token.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesApi::search`].
    async fn search_next_page(&self, token: &str) -> Result<SearchResponse, PlacesError>;
}

#[async_trait]
impl<T> PlacesApi for Arc<T>
where
    T: PlacesApi + ?Sized,
{
    async fn search(&self, request: &NearbySearchRequest) -> Result<SearchResponse, PlacesError> {
        (**self).search(request).await
    }

    async fn search_next_page(&self, token: &str) -> Result<SearchResponse, PlacesError> {
        (**self).search_next_page(token).await
    }
}
