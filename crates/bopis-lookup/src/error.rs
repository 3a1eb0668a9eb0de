use thiserror::Error;

/// Errors from the lookup services.
///
/// Every variant is a single failed attempt; nothing here is retried. A
/// lookup that succeeds with zero stores is *not* an error — callers get an
/// empty list and must render it as "no results", distinct from any of
/// these.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A response that must carry at least one document came back empty
    /// (e.g. a postcode the geocoder cannot place).
    #[error("no results from {context}")]
    EmptyResult { context: String },

    /// A configured base URL is not parseable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
