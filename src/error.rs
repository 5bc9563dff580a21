use thiserror::Error;

/// Failures while pulling data from the ranking service
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid endpoint \"{endpoint}\": {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Requests the background relay refuses to dispatch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    #[error("Unknown action")]
    UnknownAction,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Why the popup could not show data; each maps to a terminal view
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("could not resolve active tab: {0}")]
    TabResolution(String),

    #[error("relay call failed: {0}")]
    Transport(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("no data for this site")]
    NoData,
}
