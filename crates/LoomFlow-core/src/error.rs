use thiserror::Error;

/// Failures of a round-trip to the workflow server.
///
/// None of these are retried; the caller surfaces them to the user and the
/// local graph is left untouched.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid server url: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Rejected editor operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),

    #[error("node '{0}' not found")]
    NodeNotFound(String),
}
