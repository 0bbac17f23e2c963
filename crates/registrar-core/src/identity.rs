//! # Identifier Newtypes
//!
//! [`ItemId`] keys a record inside a catalogue collection.
//! [`CatalogueEndpoint`] is the base URL of a records catalogue; every item
//! URL the gateway calls or links to is derived from it.
//!
//! Both validate at construction time, so downstream code never re-checks.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::IdentifierError;

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Identifier of a catalogue item, taken from the resource document's
/// top-level `id` field.
///
/// An item id is always exactly one path segment of the item URL. `.` and
/// `..` are rejected because URL normalization would resolve them onto
/// the collection (or its parent) instead of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create an item identifier, rejecting the empty string and the
    /// dot segments.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentifierError::EmptyItemId);
        }
        if is_dot_segment(&id) {
            return Err(IdentifierError::ReservedItemId(id));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `.` and `..`. Any other text, `%` included, is percent-encoded into a
/// single segment by [`CatalogueEndpoint::item_url`].
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl TryFrom<String> for ItemId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// CatalogueEndpoint
// ---------------------------------------------------------------------------

/// Base URL of an OGC API Records catalogue.
///
/// Only `http` and `https` URLs are accepted. Query strings and fragments
/// are rejected because item URLs are built by appending path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogueEndpoint(Url);

impl CatalogueEndpoint {
    /// Parse and validate a catalogue base URL.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let invalid = |reason: String| IdentifierError::InvalidEndpoint {
            value: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme \"{other}\""))),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query strings and fragments are not allowed".into()));
        }
        Ok(Self(url))
    }

    /// The endpoint as a string without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Access the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// `{endpoint}/collections/{collection}/items`.
    pub fn items_url(&self, collection: &str) -> Url {
        self.with_segments(&["collections", collection, "items"])
    }

    /// `{endpoint}/collections/{collection}/items/{id}`.
    pub fn item_url(&self, collection: &str, id: &ItemId) -> Url {
        self.with_segments(&["collections", collection, "items", id.as_str()])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        // http(s) URLs always have a path base, so this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl TryFrom<String> for CatalogueEndpoint {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CatalogueEndpoint> for String {
    fn from(endpoint: CatalogueEndpoint) -> Self {
        endpoint.as_str().to_string()
    }
}

impl std::fmt::Display for CatalogueEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_rejects_empty() {
        assert_eq!(ItemId::new(""), Err(IdentifierError::EmptyItemId));
        assert_eq!(ItemId::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn item_id_rejects_dot_segments() {
        for reserved in [".", ".."] {
            assert_eq!(
                ItemId::new(reserved),
                Err(IdentifierError::ReservedItemId(reserved.to_string())),
                "{reserved} should be rejected"
            );
        }
        for allowed in ["...", ".hidden", "a.b", "..x", "%2e"] {
            assert!(ItemId::new(allowed).is_ok(), "{allowed} should be accepted");
        }
    }

    #[test]
    fn item_url_always_addresses_an_item() {
        let endpoint = CatalogueEndpoint::parse("http://cat:5002").unwrap();
        let items = endpoint.items_url("metadata:main");
        for raw in ["abc123", "...", "a/b", "../x", "a?b#c", "%2e%2e"] {
            let id = ItemId::new(raw).unwrap();
            let url = endpoint.item_url("metadata:main", &id);
            assert_ne!(url, items, "{raw} collapsed onto the collection");
            assert_eq!(
                url.path_segments().map(Iterator::count),
                Some(4),
                "{raw} produced {url}"
            );
            assert!(url.query().is_none() && url.fragment().is_none(), "{url}");
        }
    }

    #[test]
    fn item_id_deserialization_validates() {
        let ok: Result<ItemId, _> = serde_json::from_str("\"abc\"");
        assert!(ok.is_ok());
        let empty: Result<ItemId, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
        let parent: Result<ItemId, _> = serde_json::from_str("\"..\"");
        assert!(parent.is_err());
    }

    #[test]
    fn endpoint_item_url_has_no_double_slash() {
        let endpoint = CatalogueEndpoint::parse("http://cat:5002").unwrap();
        let id = ItemId::new("abc123").unwrap();
        assert_eq!(
            endpoint.item_url("metadata:main", &id).as_str(),
            "http://cat:5002/collections/metadata:main/items/abc123"
        );

        let with_slash = CatalogueEndpoint::parse("http://cat:5002/").unwrap();
        assert_eq!(
            with_slash.item_url("metadata:main", &id),
            endpoint.item_url("metadata:main", &id)
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let endpoint = CatalogueEndpoint::parse("https://host/resource-catalogue/").unwrap();
        assert_eq!(endpoint.as_str(), "https://host/resource-catalogue");
        assert_eq!(
            endpoint.items_url("metadata:main").as_str(),
            "https://host/resource-catalogue/collections/metadata:main/items"
        );
    }

    #[test]
    fn endpoint_escapes_item_id_segment() {
        let endpoint = CatalogueEndpoint::parse("http://cat").unwrap();
        let id = ItemId::new("a/b c").unwrap();
        assert_eq!(
            endpoint.item_url("metadata:main", &id).as_str(),
            "http://cat/collections/metadata:main/items/a%2Fb%20c"
        );
    }

    #[test]
    fn endpoint_rejects_non_http_schemes() {
        assert!(CatalogueEndpoint::parse("ftp://cat").is_err());
        assert!(CatalogueEndpoint::parse("not a url").is_err());
        assert!(CatalogueEndpoint::parse("http://cat?x=1").is_err());
    }

    #[test]
    fn endpoint_serde_uses_trimmed_string() {
        let endpoint: CatalogueEndpoint = serde_json::from_str("\"http://cat:5002/\"").unwrap();
        assert_eq!(serde_json::to_string(&endpoint).unwrap(), "\"http://cat:5002\"");
    }
}
