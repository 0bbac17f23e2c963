#![deny(missing_docs)]

//! # registrar-core — Foundational Types for the Registration Gateway
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json`,
//! `thiserror`, `url`, and `async-trait` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** An [`ItemId`] is not a `String`
//!    and a [`CatalogueEndpoint`] is not a bare `Url`: both validate at
//!    construction time.
//!
//! 2. **Typed existence.** [`Catalogue::lookup`] answers with
//!    [`Lookup::Found`] or [`Lookup::Absent`]; transport and server failures
//!    travel on the error channel and are never read as "absent".
//!
//! 3. **[`RegistrarError`] hierarchy.** Structured errors with `thiserror`:
//!    no `Box<dyn Error>` at API boundaries, no `.unwrap()` outside tests.

pub mod catalogue;
pub mod document;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod outputs;
pub mod request;
pub mod result;

// Re-export primary types at crate root for ergonomic imports.
pub use catalogue::{Catalogue, CatalogueError, Lookup, METADATA_COLLECTION};
pub use document::{ResourceDocument, Source};
pub use error::{IdentifierError, RegistrarError, ValidationIssue};
pub use fetch::{FetchError, Fetcher};
pub use identity::{CatalogueEndpoint, ItemId};
pub use outputs::{OutputSelection, ECHO_OUTPUT};
pub use request::{DeregistrationRequest, RegistrationRequest};
pub use result::{CatalogueLink, DeregistrationResult, RegistrationResult};
