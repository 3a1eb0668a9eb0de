use thiserror::Error;

use crate::types::UserError;

/// Errors from the draft-order sync path.
///
/// Non-fatal to the caller's larger flow by design: callers check the
/// result explicitly and decide whether to proceed or alert the user. A
/// failed read aborts the cycle before any mutation is attempted.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level GraphQL errors in the response envelope.
    #[error("GraphQL errors for {context}: {messages:?}")]
    Api {
        context: String,
        messages: Vec<String>,
    },

    /// The mutation executed but reported field-level user errors.
    #[error("draft order update rejected: {0:?}")]
    UserErrors(Vec<UserError>),

    /// A well-formed response missing a required object (e.g. no
    /// `draftOrder` for the given id).
    #[error("malformed or missing data for {context}")]
    MissingData { context: String },

    /// Cursor pagination exceeded the hard page cap; guards cycling
    /// cursors.
    #[error("pagination limit reached for order {order_id}: exceeded {max_pages} pages")]
    PaginationLimit { order_id: String, max_pages: usize },

    #[error("invalid GraphQL endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
