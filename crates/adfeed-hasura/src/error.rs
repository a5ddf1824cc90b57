use thiserror::Error;

/// Errors returned by the Hasura GraphQL client.
///
/// Any of these aborts the whole batch; per-ad payload problems are reported
/// as [`crate::SkipReason`] instead.
#[derive(Debug, Error)]
pub enum HasuraError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid GraphQL endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The GraphQL response carried a non-empty `errors` array.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("GraphQL response has no data")]
    MissingData,
}
