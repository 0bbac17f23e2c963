//! # Registration Reconciler
//!
//! Orchestrates one process invocation against the catalogue:
//!
//! ```text
//! register:   Validating → Fetching → ResolvingExistence → {Creating | Updating} → Done
//! deregister: Validating → ResolvingExistence → {Deleting | (no-op)} → Done
//! ```
//!
//! Any phase may end the invocation with a [`RegistrarError`]. Validation
//! always completes before the first outbound call, so an invalid request
//! never touches the network.
//!
//! ## Upsert semantics
//!
//! The lookup only chooses the write verb. The write always carries the
//! full resolved document: no merge, no concurrency token. Lookup and write
//! are two calls, so concurrent registrations of one id race; the loser of
//! a create/create race sees [`CatalogueError::Conflict`] and an
//! update/update race is last-writer-wins.

use std::sync::Arc;

use registrar_core::{
    Catalogue, CatalogueError, CatalogueLink, DeregistrationRequest, DeregistrationResult,
    Fetcher, Lookup, OutputSelection, RegistrarError, RegistrationRequest, RegistrationResult,
    ResourceDocument, Source, METADATA_COLLECTION,
};
use registrar_schema::{RequestSchema, SchemaValidator};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::metadata::ProcessId;
use crate::output::ProcessOutput;
use crate::policy::DeletePolicy;

/// Reconciliation phase, recorded on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Checking the descriptor against its schema.
    Validating,
    /// Resolving the source into a resource document.
    Fetching,
    /// Asking the catalogue whether the item exists.
    ResolvingExistence,
    /// Inserting a new item.
    Creating,
    /// Replacing an existing item.
    Updating,
    /// Removing an existing item.
    Deleting,
    /// Finished successfully.
    Done,
}

impl Phase {
    /// Log spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::ResolvingExistence => "resolving_existence",
            Self::Creating => "creating",
            Self::Updating => "updating",
            Self::Deleting => "deleting",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn enter(phase: Phase) {
    tracing::debug!(phase = %phase, "entering phase");
}

/// Runs registrations and deregistrations.
///
/// Holds only immutable collaborators, so one instance serves every
/// concurrent invocation.
#[derive(Clone)]
pub struct Reconciler {
    catalogue: Arc<dyn Catalogue>,
    fetcher: Arc<dyn Fetcher>,
    schemas: Arc<SchemaValidator>,
    delete_policy: DeletePolicy,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("schemas", &self.schemas)
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Create a reconciler with the default delete policy.
    pub fn new(
        catalogue: Arc<dyn Catalogue>,
        fetcher: Arc<dyn Fetcher>,
        schemas: Arc<SchemaValidator>,
    ) -> Self {
        Self {
            catalogue,
            fetcher,
            schemas,
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Replace the delete policy.
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// The active delete policy.
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// The validator used for request descriptors.
    pub fn schemas(&self) -> &SchemaValidator {
        &self.schemas
    }

    /// Run `process` on `inputs` and shape the result for `outputs`.
    ///
    /// Each invocation gets its own span carrying the process id and a
    /// fresh invocation id.
    pub async fn execute(
        &self,
        process: ProcessId,
        inputs: &Value,
        outputs: &OutputSelection,
    ) -> Result<ProcessOutput, RegistrarError> {
        let span = tracing::info_span!(
            "process",
            process = %process,
            invocation = %Uuid::new_v4(),
        );

        async {
            let result = self.run(process, inputs, outputs).await;
            match &result {
                Ok(_) => enter(Phase::Done),
                Err(e) => tracing::warn!(error = %e, "process failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        process: ProcessId,
        inputs: &Value,
        outputs: &OutputSelection,
    ) -> Result<ProcessOutput, RegistrarError> {
        match process {
            ProcessId::Registrar => {
                let result = self.register(inputs).await?;
                ProcessOutput::shape(&result, process.as_str(), outputs)
            }
            ProcessId::Deregistrar => {
                let result = self.deregister(inputs).await?;
                ProcessOutput::shape(&result, process.as_str(), outputs)
            }
        }
    }

    /// Validate, resolve and upsert a resource.
    pub async fn register(&self, inputs: &Value) -> Result<RegistrationResult, RegistrarError> {
        enter(Phase::Validating);
        self.schemas.ensure_valid(RequestSchema::Register, inputs)?;
        let request = RegistrationRequest::from_validated(inputs.clone())?;

        enter(Phase::Fetching);
        let document = self.resolve(request.source).await?;
        let id = document.id().clone();

        enter(Phase::ResolvingExistence);
        let existing = self
            .catalogue
            .lookup(&request.target, METADATA_COLLECTION, &id)
            .await?;

        match existing {
            Lookup::Found(_) => {
                enter(Phase::Updating);
                tracing::info!(%id, target = %request.target, "item exists, updating");
                self.catalogue
                    .update(&request.target, METADATA_COLLECTION, &id, &document)
                    .await?;
            }
            Lookup::Absent => {
                enter(Phase::Creating);
                tracing::info!(%id, target = %request.target, "item absent, creating");
                self.catalogue
                    .create(&request.target, METADATA_COLLECTION, &document)
                    .await?;
            }
        }

        Ok(RegistrationResult {
            id: ProcessId::Registrar.as_str().to_string(),
            link: Some(CatalogueLink::to_item(&request.target, &id)),
        })
    }

    /// Validate and remove a resource. Succeeds when the item is absent.
    pub async fn deregister(&self, inputs: &Value) -> Result<DeregistrationResult, RegistrarError> {
        enter(Phase::Validating);
        self.schemas.ensure_valid(RequestSchema::Deregister, inputs)?;
        let request = DeregistrationRequest::from_validated(inputs.clone())?;
        let id = &request.id;

        enter(Phase::ResolvingExistence);
        let existing = self
            .catalogue
            .lookup(&request.target, METADATA_COLLECTION, id)
            .await?;

        match existing {
            Lookup::Found(_) => {
                enter(Phase::Deleting);
                let deleted = self
                    .catalogue
                    .delete(&request.target, METADATA_COLLECTION, id)
                    .await;
                self.settle_delete(id.as_str(), deleted)?;
            }
            Lookup::Absent => {
                tracing::info!(%id, target = %request.target, "item not registered, nothing to delete");
            }
        }

        Ok(DeregistrationResult {
            id: ProcessId::Deregistrar.as_str().to_string(),
        })
    }

    fn settle_delete(&self, id: &str, outcome: Result<(), CatalogueError>) -> Result<(), RegistrarError> {
        match outcome {
            Ok(()) => {
                tracing::info!(id, "item deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(id, "item vanished before delete");
                Ok(())
            }
            Err(e) => match self.delete_policy {
                DeletePolicy::Surface => Err(e.into()),
                DeletePolicy::LogOnly => {
                    tracing::error!(id, error = %e, "delete failed, reporting success");
                    Ok(())
                }
            },
        }
    }

    async fn resolve(&self, source: Source) -> Result<ResourceDocument, RegistrarError> {
        let body = match source {
            Source::Uri(uri) => {
                tracing::debug!(%uri, "fetching source");
                self.fetcher.fetch(&uri).await?
            }
            Source::Inline(object) => Value::Object(object),
        };
        ResourceDocument::from_value(body)
    }
}
