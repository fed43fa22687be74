use thiserror::Error;

/// Errors returned by the Places client and the nearby search orchestrator.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The Places API answered with a non-success `"status"` such as
    /// `REQUEST_DENIED` or `OVER_QUERY_LIMIT`.
    #[error("Places API error {status}: {message}")]
    RemoteService { status: String, message: String },

    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The inter-page pause was interrupted before it completed.
    #[error("nearby search interrupted while waiting for the next page")]
    Interrupted,

    /// A continuation token was still present after the last allowed page.
    #[error("Places API kept paginating past {max_pages} pages")]
    ProtocolViolation { max_pages: usize },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("radius must be between 1 and {max} meters, got {radius_meters}")]
    InvalidRadius { radius_meters: u32, max: u32 },

    #[error("origin ({x}, {y}) is not a valid longitude/latitude pair")]
    InvalidOrigin { x: f64, y: f64 },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
