//! Errors that can occur when talking to the remote hosts

use http::{HeaderMap, StatusCode};
use thiserror::Error;
use url::Url;

/// Errors from performing a single exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Connection, TLS or middleware failure before a response was read.
    #[error(transparent)]
    Transport(#[from] reqwest_middleware::Error),

    #[allow(missing_docs)]
    #[error("Invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[allow(missing_docs)]
    #[error(transparent)]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[allow(missing_docs)]
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// The server answered with a status of 400 or above.
    #[allow(missing_docs)]
    #[error("Request error: [{status}] {message}")]
    Status {
        status: StatusCode,
        message: String,
        url: Url,
        request_body: Option<String>,
        headers: HeaderMap,
        body: String,
    },
}

impl From<reqwest::Error> for ExchangeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.into())
    }
}
