//! # Catalogue Seam
//!
//! The reconciler talks to the records catalogue only through the
//! [`Catalogue`] trait. The HTTP implementation lives in `registrar-client`;
//! tests substitute in-memory fakes.
//!
//! ## Existence contract
//!
//! [`Catalogue::lookup`] returns [`Lookup::Absent`] only when the catalogue
//! positively answers "no such item". Connection failures, timeouts and
//! unexpected statuses are [`CatalogueError`]s, so the create/update branch
//! is never chosen on the strength of a broken lookup.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::document::ResourceDocument;
use crate::identity::{CatalogueEndpoint, ItemId};

/// The collection every registration targets.
pub const METADATA_COLLECTION: &str = "metadata:main";

/// Boxed source error for transport-level failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of an existence lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The item exists; carries the stored representation.
    Found(Value),
    /// The catalogue reports no item under this identifier.
    Absent,
}

/// Errors from catalogue operations.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        /// Method and URL of the failed call.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// Create was rejected because the item already exists.
    #[error("item {id} already exists in {collection}")]
    Conflict {
        /// Target collection.
        collection: String,
        /// Conflicting identifier.
        id: String,
    },

    /// Update or delete addressed an item that does not exist.
    #[error("item {id} not found in {collection}")]
    NotFound {
        /// Target collection.
        collection: String,
        /// Missing identifier.
        id: String,
    },

    /// The catalogue answered with a status the operation does not accept.
    #[error("catalogue {endpoint} returned {status}: {body}")]
    Status {
        /// Method and URL of the failed call.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// A successful response body could not be decoded.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Method and URL of the failed call.
        endpoint: String,
        /// Underlying decode error.
        #[source]
        source: BoxError,
    },
}

impl CatalogueError {
    /// Whether this error means the addressed item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Item-level operations of a records catalogue.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request handlers behind an `Arc`. The trait is object-safe to support
/// runtime selection (HTTP client vs. in-memory fake).
#[async_trait]
pub trait Catalogue: Send + Sync {
    /// Determine whether `id` exists in `collection`.
    async fn lookup(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
    ) -> Result<Lookup, CatalogueError>;

    /// Insert a new item keyed by the document's identifier.
    async fn create(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        document: &ResourceDocument,
    ) -> Result<(), CatalogueError>;

    /// Replace the stored item with the full document.
    async fn update(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
        document: &ResourceDocument,
    ) -> Result<(), CatalogueError>;

    /// Remove the item.
    async fn delete(
        &self,
        endpoint: &CatalogueEndpoint,
        collection: &str,
        id: &ItemId,
    ) -> Result<(), CatalogueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished_from_status_errors() {
        let missing = CatalogueError::NotFound {
            collection: METADATA_COLLECTION.into(),
            id: "ghost".into(),
        };
        assert!(missing.is_not_found());

        let broken = CatalogueError::Status {
            endpoint: "DELETE http://cat/collections/metadata:main/items/ghost".into(),
            status: 503,
            body: "unavailable".into(),
        };
        assert!(!broken.is_not_found());
        assert!(broken.to_string().contains("503"));
    }
}
