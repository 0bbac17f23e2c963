//! # Resource Fetch Seam
//!
//! Dereferencing a URI source is the only outbound call that does not go
//! to the catalogue. One attempt per invocation: retries belong to the
//! transport, not to the gateway.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::catalogue::BoxError;

/// Errors from dereferencing a source URI.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Only `http` and `https` sources can be dereferenced.
    #[error("cannot fetch {uri}: unsupported scheme \"{scheme}\"")]
    UnsupportedScheme {
        /// The source URI.
        uri: String,
        /// Its scheme.
        scheme: String,
    },

    /// No response was received.
    #[error("transport error fetching {uri}: {source}")]
    Transport {
        /// The source URI.
        uri: String,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// The origin answered with a non-success status.
    #[error("fetching {uri} returned {status}")]
    Status {
        /// The source URI.
        uri: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not valid JSON.
    #[error("response from {uri} is not JSON: {source}")]
    NotJson {
        /// The source URI.
        uri: String,
        /// Underlying decode error.
        #[source]
        source: BoxError,
    },
}

/// Dereferences source URIs into JSON values.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issue a single GET for `uri` and parse the body as JSON.
    async fn fetch(&self, uri: &Url) -> Result<Value, FetchError>;
}
