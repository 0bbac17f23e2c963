//! Client construction errors.
//!
//! Per-call failures are [`registrar_core::CatalogueError`] and
//! [`registrar_core::FetchError`]; this type only covers building the
//! clients.

/// Errors creating the HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP client could not be built.
    #[error("HTTP error during {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
