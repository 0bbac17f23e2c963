//! # Process Metadata
//!
//! Declarative descriptions of the two processes, in the shape OGC API
//! Processes clients expect from `/processes` and `/processes/{id}`.
//!
//! Descriptions are built once from the compiled schemas (so the input
//! schema fragments advertised are exactly the ones enforced) and are
//! immutable afterwards. They exist for discovery only; nothing in the
//! reconciler reads them.

use std::collections::BTreeMap;
use std::str::FromStr;

use registrar_schema::{RequestSchema, SchemaValidator};
use serde::Serialize;
use serde_json::{json, Value};

/// Version advertised by both processes.
pub const PROCESS_VERSION: &str = "0.1.0";

/// Documentation link advertised by both processes.
pub const ABOUT_HREF: &str = "https://eoepca.readthedocs.io/projects/resource-registration";

/// Example source used in the registration example request.
const EXAMPLE_SOURCE: &str =
    "https://raw.githubusercontent.com/radiantearth/stac-spec/refs/heads/master/examples/simple-item.json";

/// Example catalogue endpoint used in both example requests.
const EXAMPLE_TARGET: &str = "http://resource-catalogue:5002";

/// The processes this gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProcessId {
    /// Upsert a resource into the catalogue.
    Registrar,
    /// Remove a resource from the catalogue.
    Deregistrar,
}

impl ProcessId {
    /// Every process, in listing order.
    pub const ALL: [ProcessId; 2] = [Self::Registrar, Self::Deregistrar];

    /// Identifier used in URLs, results and output selections.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registrar => "registrar",
            Self::Deregistrar => "deregistrar",
        }
    }

    /// Request schema enforced on this process's inputs.
    pub fn schema(self) -> RequestSchema {
        match self {
            Self::Registrar => RequestSchema::Register,
            Self::Deregistrar => RequestSchema::Deregister,
        }
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown process identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("process \"{0}\" not found")]
pub struct UnknownProcess(pub String);

impl FromStr for ProcessId {
    type Err = UnknownProcess;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProcess(s.to_string()))
    }
}

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl Link {
    fn about() -> Self {
        Self {
            href: ABOUT_HREF.to_string(),
            rel: "about".to_string(),
            media_type: Some("text/html".to_string()),
            title: Some("information".to_string()),
            hreflang: Some("en-US".to_string()),
        }
    }
}

/// One advertised input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescription {
    pub title: String,
    pub description: String,
    pub schema: Value,
    pub min_occurs: u32,
    pub max_occurs: u32,
    pub keywords: Vec<String>,
}

/// One advertised output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputDescription {
    pub title: String,
    pub description: String,
    pub schema: Value,
}

/// Full description of a process, served by `GET /processes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDescription {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub job_control_options: Vec<String>,
    pub keywords: Vec<String>,
    pub links: Vec<Link>,
    pub inputs: BTreeMap<String, InputDescription>,
    pub outputs: BTreeMap<String, OutputDescription>,
    pub example: Value,
}

/// Listing entry, served by `GET /processes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub job_control_options: Vec<String>,
    pub keywords: Vec<String>,
    pub links: Vec<Link>,
}

impl From<&ProcessDescription> for ProcessSummary {
    fn from(d: &ProcessDescription) -> Self {
        Self {
            id: d.id.clone(),
            title: d.title.clone(),
            description: d.description.clone(),
            version: d.version.clone(),
            job_control_options: d.job_control_options.clone(),
            keywords: d.keywords.clone(),
            links: d.links.clone(),
        }
    }
}

/// Immutable registry of process descriptions.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    registrar: ProcessDescription,
    deregistrar: ProcessDescription,
}

impl ProcessRegistry {
    /// Build both descriptions from the schemas the validator enforces.
    pub fn new(schemas: &SchemaValidator) -> Self {
        Self {
            registrar: describe(ProcessId::Registrar, schemas),
            deregistrar: describe(ProcessId::Deregistrar, schemas),
        }
    }

    /// Description of one process.
    pub fn get(&self, id: ProcessId) -> &ProcessDescription {
        match id {
            ProcessId::Registrar => &self.registrar,
            ProcessId::Deregistrar => &self.deregistrar,
        }
    }

    /// Listing entries for every process.
    pub fn summaries(&self) -> Vec<ProcessSummary> {
        ProcessId::ALL
            .into_iter()
            .map(|id| ProcessSummary::from(self.get(id)))
            .collect()
    }
}

fn fragment(schemas: &SchemaValidator, kind: RequestSchema, property: &str) -> Value {
    schemas
        .property_schema(kind, property)
        .cloned()
        .unwrap_or_else(|| json!({}))
}

fn input(
    title: &str,
    description: &str,
    schema: Value,
    min_occurs: u32,
    keyword: &str,
) -> InputDescription {
    InputDescription {
        title: title.to_string(),
        description: description.to_string(),
        schema,
        min_occurs,
        max_occurs: 1,
        keywords: vec![keyword.to_string()],
    }
}

fn describe(id: ProcessId, schemas: &SchemaValidator) -> ProcessDescription {
    let kind = id.schema();
    let target = input(
        "Target",
        "Catalogue endpoint receiving the operation",
        fragment(schemas, kind, "target"),
        1,
        "target",
    );

    let (title, keyword, inputs, example) = match id {
        ProcessId::Registrar => (
            "Resource registration",
            "registration",
            BTreeMap::from([
                (
                    "type".to_string(),
                    input("Type", "Type of resource", fragment(schemas, kind, "type"), 1, "type"),
                ),
                (
                    "source".to_string(),
                    input(
                        "Source",
                        "Source of resource: a URL or the resource document itself",
                        fragment(schemas, kind, "source"),
                        1,
                        "source",
                    ),
                ),
                ("target".to_string(), target),
            ]),
            json!({
                "inputs": {
                    "type": "item",
                    "source": EXAMPLE_SOURCE,
                    "target": EXAMPLE_TARGET
                }
            }),
        ),
        ProcessId::Deregistrar => (
            "Resource deregistration",
            "deregistration",
            BTreeMap::from([
                (
                    "id".to_string(),
                    input(
                        "Identifier",
                        "Resource identifier",
                        fragment(schemas, kind, "id"),
                        1,
                        "identifier",
                    ),
                ),
                ("target".to_string(), target),
            ]),
            json!({
                "inputs": {
                    "id": "id123",
                    "target": EXAMPLE_TARGET
                }
            }),
        ),
    };

    let output = OutputDescription {
        title: title.to_string(),
        description: title.to_string(),
        schema: json!({"type": "object", "contentMediaType": "application/json"}),
    };

    ProcessDescription {
        id: id.as_str().to_string(),
        title: title.to_string(),
        description: title.to_string(),
        version: PROCESS_VERSION.to_string(),
        job_control_options: vec!["sync-execute".to_string()],
        keywords: vec!["resource".to_string(), keyword.to_string()],
        links: vec![Link::about()],
        inputs,
        outputs: BTreeMap::from([(id.as_str().to_string(), output)]),
        example,
    }
}
