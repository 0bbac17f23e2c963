//! # Result Bodies
//!
//! Success shapes for both operations. Field names follow the wire format
//! consumers already parse, including the hyphenated link key.

use serde::{Deserialize, Serialize};

use crate::catalogue::METADATA_COLLECTION;
use crate::identity::{CatalogueEndpoint, ItemId};

/// Media type of catalogue items.
pub const ITEM_MEDIA_TYPE: &str = "application/geo+json";

/// Hypermedia link to a stored catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueLink {
    /// Absolute URL of the item.
    pub href: String,
    /// Link relation, always `item`.
    pub rel: String,
    /// Media type of the item representation.
    #[serde(rename = "type")]
    pub media_type: String,
}

impl CatalogueLink {
    /// Link to `id` in the metadata collection of `endpoint`.
    pub fn to_item(endpoint: &CatalogueEndpoint, id: &ItemId) -> Self {
        Self {
            href: endpoint.item_url(METADATA_COLLECTION, id).to_string(),
            rel: "item".to_string(),
            media_type: ITEM_MEDIA_TYPE.to_string(),
        }
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    /// Identifier of the process that produced the result.
    pub id: String,
    /// Where the registered item now lives.
    #[serde(
        rename = "resource-and-data-catalogue-link",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub link: Option<CatalogueLink>,
}

/// Outcome of a deregistration, whether or not anything was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeregistrationResult {
    /// Identifier of the process that produced the result.
    pub id: String,
}
