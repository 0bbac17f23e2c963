//! # Request Descriptors
//!
//! Typed views of the caller-supplied descriptors. They are built only
//! after the raw JSON has passed schema validation; see
//! [`RegistrationRequest::from_validated`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Source;
use crate::error::{RegistrarError, ValidationIssue};
use crate::identity::{CatalogueEndpoint, ItemId};

/// Register (upsert) a resource into a catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Free-form resource-type tag (`item`, `collection`, `workflow`, ...).
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Where the resource payload comes from.
    pub source: Source,
    /// Catalogue to register into.
    pub target: CatalogueEndpoint,
}

/// Remove a resource from a catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeregistrationRequest {
    /// Identifier of the catalogue item.
    pub id: ItemId,
    /// Catalogue to deregister from.
    pub target: CatalogueEndpoint,
}

impl RegistrationRequest {
    /// Convert a schema-validated JSON value into a typed request.
    ///
    /// Constraints the schema cannot express (endpoint scheme, reserved
    /// identifiers) surface here as a [`RegistrarError::Validation`] with
    /// one issue per offending field.
    pub fn from_validated(value: Value) -> Result<Self, RegistrarError> {
        let mut issues = Vec::new();
        check_target(&value, &mut issues);
        from_validated(value, issues)
    }
}

impl DeregistrationRequest {
    /// Convert a schema-validated JSON value into a typed request.
    pub fn from_validated(value: Value) -> Result<Self, RegistrarError> {
        let mut issues = Vec::new();
        if let Some(Value::String(id)) = value.get("id") {
            if let Err(e) = ItemId::new(id.as_str()) {
                issues.push(ValidationIssue::new("/id", e.to_string()));
            }
        }
        check_target(&value, &mut issues);
        from_validated(value, issues)
    }
}

fn check_target(value: &Value, issues: &mut Vec<ValidationIssue>) {
    if let Some(Value::String(target)) = value.get("target") {
        if let Err(e) = CatalogueEndpoint::parse(target) {
            issues.push(ValidationIssue::new("/target", e.to_string()));
        }
    }
}

fn from_validated<T: serde::de::DeserializeOwned>(
    value: Value,
    issues: Vec<ValidationIssue>,
) -> Result<T, RegistrarError> {
    if !issues.is_empty() {
        return Err(RegistrarError::Validation(issues));
    }
    serde_json::from_value(value)
        .map_err(|e| RegistrarError::Validation(vec![ValidationIssue::new("", e.to_string())]))
}
