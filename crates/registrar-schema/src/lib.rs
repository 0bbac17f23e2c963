//! # registrar-schema — Request Schema Validation
//!
//! Runtime JSON Schema validation for register and deregister descriptors.
//!
//! ## Design
//!
//! The schemas ship inside the binary (`schemas/*.schema.json`) and are
//! compiled once when the [`SchemaValidator`] is built. The STAC item schema
//! referenced by the register schema is resolved from the bundled copy, so
//! validation never touches the network.

pub mod validate;

// Re-export primary types.
pub use validate::{RequestSchema, SchemaError, SchemaValidator};
