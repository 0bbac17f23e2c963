//! # registrar-client — HTTP Clients for the Registration Gateway
//!
//! Two outbound surfaces, sharing one connection pool:
//!
//! - **Records catalogue** via [`records::RecordsClient`], an implementation
//!   of [`registrar_core::Catalogue`] over the OGC API Records item paths.
//! - **Resource origins** via [`fetcher::HttpFetcher`], an implementation of
//!   [`registrar_core::Fetcher`] issuing one GET per source URI.
//!
//! ## API Path Convention
//!
//! Catalogue items live at `{target}/collections/{collection}/items/{id}`.
//! The target is chosen per request, so the clients hold no base URL.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod records;

pub use config::ClientConfig;
pub use error::ClientError;
pub use fetcher::HttpFetcher;
pub use records::RecordsClient;

use std::time::Duration;

/// Top-level client. Holds the catalogue and fetch sub-clients.
#[derive(Debug, Clone)]
pub struct RegistrarClient {
    records: RecordsClient,
    fetcher: HttpFetcher,
}

impl RegistrarClient {
    /// Create the clients from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            records: RecordsClient::new(http.clone(), config.catalogue_token),
            fetcher: HttpFetcher::new(http),
        })
    }

    /// Access the records catalogue client.
    pub fn records(&self) -> &RecordsClient {
        &self.records
    }

    /// Access the resource fetcher.
    pub fn fetcher(&self) -> &HttpFetcher {
        &self.fetcher
    }
}
