//! # registrar-process — Registration Processes
//!
//! The two processes of the gateway and everything needed to run and
//! advertise them:
//!
//! - [`reconcile::Reconciler`]: validate → resolve → lookup →
//!   create-or-update, and validate → lookup → delete.
//! - [`output::ProcessOutput`]: applies the caller's output selection.
//! - [`metadata::ProcessRegistry`]: immutable process descriptions for
//!   discovery.
//! - [`policy::DeletePolicy`]: what a failed delete means to the caller.
//!
//! The reconciler depends only on the [`registrar_core::Catalogue`] and
//! [`registrar_core::Fetcher`] traits; wiring in the HTTP clients is the
//! binary's job.

pub mod metadata;
pub mod output;
pub mod policy;
pub mod reconcile;

pub use metadata::{ProcessDescription, ProcessId, ProcessRegistry, ProcessSummary, UnknownProcess};
pub use output::{ProcessOutput, RESULT_MEDIA_TYPE};
pub use policy::{DeletePolicy, UnknownPolicy};
pub use reconcile::{Phase, Reconciler};
