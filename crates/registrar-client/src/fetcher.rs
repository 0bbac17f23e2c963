//! Single-shot resource fetcher.
//!
//! Dereferences `http`/`https` source URIs with one GET and parses the body
//! as JSON. No caching and no retry.

use async_trait::async_trait;
use registrar_core::{FetchError, Fetcher};
use serde_json::Value;
use url::Url;

/// Fetches resource documents from their origin.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &Url) -> Result<Value, FetchError> {
        if !matches!(uri.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme {
                uri: uri.to_string(),
                scheme: uri.scheme().to_string(),
            });
        }

        tracing::debug!(%uri, "fetching resource");

        let transport = |e: reqwest::Error| FetchError::Transport {
            uri: uri.to_string(),
            source: Box::new(e),
        };

        let resp = self.http.get(uri.clone()).send().await.map_err(transport)?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                uri: uri.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::NotJson {
            uri: uri.to_string(),
            source: Box::new(e),
        })
    }
}
