//! HTTP client for the public events API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared wire types do not pull in `reqwest`.

mod events;

pub use events::EventsClient;

use reqwest::StatusCode;

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
