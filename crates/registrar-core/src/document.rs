//! # Resource Documents and Sources
//!
//! A registration names its payload through a [`Source`]: either a URL to
//! dereference or the document itself inline. Whatever the origin, the
//! payload becomes a [`ResourceDocument`] only once it has a usable
//! top-level `id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::RegistrarError;
use crate::identity::ItemId;

/// Where the resource payload comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Dereference this URL with an HTTP GET and parse the body as JSON.
    Uri(Url),
    /// The resource document itself.
    Inline(Map<String, Value>),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uri(url) => write!(f, "{url}"),
            Self::Inline(_) => f.write_str("<inline document>"),
        }
    }
}

/// A resource payload keyed by its identifier.
///
/// The body is kept verbatim and written to the catalogue as the full new
/// item state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDocument {
    id: ItemId,
    body: Value,
}

impl ResourceDocument {
    /// Normalize a JSON value into a resource document.
    ///
    /// # Errors
    ///
    /// [`RegistrarError::MalformedDocument`] if the value is not an object,
    /// has no `id`, or its `id` is not a non-empty string.
    pub fn from_value(body: Value) -> Result<Self, RegistrarError> {
        let malformed = |reason: &str| RegistrarError::MalformedDocument {
            reason: reason.to_string(),
        };

        let object = body
            .as_object()
            .ok_or_else(|| malformed("document is not a JSON object"))?;
        let raw_id = object
            .get("id")
            .ok_or_else(|| malformed("document has no top-level \"id\" field"))?;
        let id = raw_id
            .as_str()
            .ok_or_else(|| malformed("document \"id\" is not a string"))?;
        let id = ItemId::new(id).map_err(|e| malformed(&e.to_string()))?;

        Ok(Self { id, body })
    }

    /// The catalogue key.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// The full document body.
    pub fn body(&self) -> &Value {
        &self.body
    }
}
