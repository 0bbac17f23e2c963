//! # Runtime Schema Validation
//!
//! Validates request descriptors against the embedded JSON Schema
//! (Draft 2020-12) documents. `$ref`s to the STAC item schema are answered
//! by a local retriever holding the bundled copy.
//!
//! ## Design
//!
//! [`SchemaValidator`] compiles both request schemas at construction time
//! and is immutable afterwards, so one instance is shared by every request.
//! Validation walks the whole instance and reports every violation: clients
//! get the complete set of problems in one round trip.
//!
//! ## Security invariant
//!
//! Schema validation is the first line of defense against malformed input.
//! No fetch or catalogue call happens for a request that has a violation.

use std::collections::HashMap;

use registrar_core::{RegistrarError, ValidationIssue};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Embedded schemas
// ---------------------------------------------------------------------------

const REGISTER_SCHEMA: &str = include_str!("../schemas/register.schema.json");
const DEREGISTER_SCHEMA: &str = include_str!("../schemas/deregister.schema.json");
const ITEM_SCHEMA: &str = include_str!("../schemas/item.schema.json");

/// Which request descriptor a document claims to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSchema {
    /// `{type, source, target}`.
    Register,
    /// `{id, target}`.
    Deregister,
}

impl RequestSchema {
    /// Schema filename, used in diagnostics.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Register => "register.schema.json",
            Self::Deregister => "deregister.schema.json",
        }
    }
}

impl std::fmt::Display for RequestSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors building the validator. Validation failures are not errors of
/// this type: they come back as [`ValidationIssue`]s.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An embedded schema is not valid JSON.
    #[error("failed to parse schema {name}: {reason}")]
    Parse {
        /// Schema filename.
        name: &'static str,
        /// Parser message.
        reason: String,
    },

    /// An embedded schema could not be compiled.
    #[error("failed to compile schema {name}: {reason}")]
    Compile {
        /// Schema filename.
        name: &'static str,
        /// Compiler message.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Schema retriever for $ref resolution
// ---------------------------------------------------------------------------

/// Resolves `$ref` URIs from the bundled schemas instead of the network.
struct LocalSchemaRetriever {
    schemas: HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// Compiled validators for both request descriptors.
pub struct SchemaValidator {
    register: jsonschema::Validator,
    deregister: jsonschema::Validator,
    register_schema: Value,
    deregister_schema: Value,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("register", &RequestSchema::Register.file_name())
            .field("deregister", &RequestSchema::Deregister.file_name())
            .finish()
    }
}

impl SchemaValidator {
    /// Parse and compile the embedded schemas.
    ///
    /// # Errors
    ///
    /// [`SchemaError`] if a bundled schema is broken. This is a build
    /// defect, surfaced at startup rather than on the first request.
    pub fn new() -> Result<Self, SchemaError> {
        let register_schema = parse("register.schema.json", REGISTER_SCHEMA)?;
        let deregister_schema = parse("deregister.schema.json", DEREGISTER_SCHEMA)?;
        let item_schema = parse("item.schema.json", ITEM_SCHEMA)?;

        let mut schemas = HashMap::new();
        if let Some(id) = item_schema.get("$id").and_then(Value::as_str) {
            schemas.insert(id.to_string(), item_schema.clone());
        }

        let register = compile("register.schema.json", &register_schema, &schemas)?;
        let deregister = compile("deregister.schema.json", &deregister_schema, &schemas)?;

        Ok(Self {
            register,
            deregister,
            register_schema,
            deregister_schema,
        })
    }

    /// The raw schema document, for capability advertisement.
    pub fn schema(&self, kind: RequestSchema) -> &Value {
        match kind {
            RequestSchema::Register => &self.register_schema,
            RequestSchema::Deregister => &self.deregister_schema,
        }
    }

    /// The schema fragment for one top-level property, if declared.
    pub fn property_schema(&self, kind: RequestSchema, property: &str) -> Option<&Value> {
        self.schema(kind).get("properties")?.get(property)
    }

    /// Validate `instance`, collecting every violation.
    ///
    /// An empty result means the instance is valid. Each violation is
    /// logged at debug level with its JSON Pointer.
    pub fn validate(&self, kind: RequestSchema, instance: &Value) -> Vec<ValidationIssue> {
        tracing::debug!(schema = %kind, "validating input against schema");

        let validator = match kind {
            RequestSchema::Register => &self.register,
            RequestSchema::Deregister => &self.deregister,
        };

        validator
            .iter_errors(instance)
            .map(|err| {
                let issue = ValidationIssue::new(err.instance_path.to_string(), err.to_string());
                tracing::debug!(schema = %kind, path = %issue.path, "{}", issue.message);
                issue
            })
            .collect()
    }

    /// Validate `instance` and turn violations into a [`RegistrarError`].
    pub fn ensure_valid(&self, kind: RequestSchema, instance: &Value) -> Result<(), RegistrarError> {
        let issues = self.validate(kind, instance);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RegistrarError::Validation(issues))
        }
    }
}

fn parse(name: &'static str, raw: &str) -> Result<Value, SchemaError> {
    serde_json::from_str(raw).map_err(|e| SchemaError::Parse {
        name,
        reason: e.to_string(),
    })
}

fn compile(
    name: &'static str,
    schema: &Value,
    schemas: &HashMap<String, Value>,
) -> Result<jsonschema::Validator, SchemaError> {
    let retriever = LocalSchemaRetriever {
        schemas: schemas.clone(),
    };

    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .with_retriever(retriever)
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| SchemaError::Compile {
            name,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> SchemaValidator {
        SchemaValidator::new().expect("embedded schemas compile")
    }

    fn stac_item(id: &str) -> Value {
        json!({
            "type": "Feature",
            "stac_version": "1.0.0",
            "id": id,
            "geometry": null,
            "properties": {"datetime": "2020-12-11T22:38:32Z"},
            "links": [],
            "assets": {}
        })
    }

    #[test]
    fn embedded_schemas_compile() {
        let v = validator();
        assert_eq!(
            v.schema(RequestSchema::Register)["required"],
            json!(["type", "source", "target"])
        );
        assert_eq!(
            v.property_schema(RequestSchema::Deregister, "id").unwrap()["type"],
            "string"
        );
        assert!(v.property_schema(RequestSchema::Register, "nope").is_none());
    }

    #[test]
    fn valid_register_with_uri_source() {
        let issues = validator().validate(
            RequestSchema::Register,
            &json!({
                "type": "item",
                "source": "https://host/simple-item.json",
                "target": "http://cat:5002"
            }),
        );
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn valid_register_with_inline_item() {
        let issues = validator().validate(
            RequestSchema::Register,
            &json!({
                "type": "item",
                "source": stac_item("abc123"),
                "target": "http://cat:5002"
            }),
        );
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn missing_source_is_reported() {
        let issues = validator().validate(
            RequestSchema::Register,
            &json!({"type": "item", "target": "http://cat:5002"}),
        );
        assert_eq!(issues.len(), 1, "{issues:?}");
        assert!(issues[0].message.contains("source"), "{}", issues[0]);
    }

    #[test]
    fn collects_every_violation() {
        let issues = validator().validate(RequestSchema::Register, &json!({"type": 42}));
        // Wrong type for `type`, plus missing `source` and `target`.
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert!(issues.iter().any(|i| i.path == "/type"));
        assert!(issues.iter().any(|i| i.message.contains("\"source\"")));
        assert!(issues.iter().any(|i| i.message.contains("\"target\"")));
    }

    #[test]
    fn inline_source_must_be_an_item() {
        let issues = validator().validate(
            RequestSchema::Register,
            &json!({
                "type": "item",
                "source": {"id": "abc123"},
                "target": "http://cat:5002"
            }),
        );
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.path.starts_with("/source")), "{issues:?}");
    }

    #[test]
    fn target_must_be_a_uri() {
        let issues = validator().validate(
            RequestSchema::Deregister,
            &json!({"id": "abc123", "target": "not a uri"}),
        );
        assert_eq!(issues.len(), 1, "{issues:?}");
        assert_eq!(issues[0].path, "/target");
    }

    #[test]
    fn deregister_requires_id_and_target() {
        let issues = validator().validate(RequestSchema::Deregister, &json!({}));
        assert_eq!(issues.len(), 2, "{issues:?}");
    }

    #[test]
    fn deregister_rejects_empty_id() {
        let issues = validator().validate(
            RequestSchema::Deregister,
            &json!({"id": "", "target": "http://cat:5002"}),
        );
        assert_eq!(issues.len(), 1, "{issues:?}");
        assert_eq!(issues[0].path, "/id");
    }

    #[test]
    fn non_object_request_is_rejected() {
        let issues = validator().validate(RequestSchema::Register, &json!("item"));
        assert!(!issues.is_empty());
    }

    #[test]
    fn ensure_valid_wraps_issues() {
        let err = validator()
            .ensure_valid(RequestSchema::Deregister, &json!({"target": "http://cat"}))
            .unwrap_err();
        assert_eq!(err.issues().map(<[_]>::len), Some(1));
    }
}
