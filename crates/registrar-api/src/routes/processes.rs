//! # Processes API
//!
//! OGC API Processes style discovery and synchronous execution.
//!
//! ## Endpoints
//!
//! - `GET /processes` — list processes
//! - `GET /processes/{id}` — describe one process
//! - `POST /processes/{id}/execution` — run a process synchronously

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use registrar_core::{OutputSelection, RegistrarError};
use registrar_process::{ProcessDescription, ProcessId, ProcessOutput, ProcessSummary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Execution request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExecuteRequest {
    /// Process inputs, validated against the process's request schema.
    #[schema(value_type = Object)]
    pub inputs: Value,
    /// Requested outputs. Only the keys matter: an absent or empty map
    /// returns the full result, as does naming `echo` or the process id.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub outputs: Option<Map<String, Value>>,
}

impl ExecuteRequest {
    fn selection(&self) -> OutputSelection {
        self.outputs
            .as_ref()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Process listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessList {
    #[schema(value_type = Vec<Object>)]
    pub processes: Vec<ProcessSummary>,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the processes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/processes", get(list_processes))
        .route("/processes/{id}", get(describe_process))
        .route("/processes/{id}/execution", post(execute_process))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /processes — List processes.
#[utoipa::path(
    get,
    path = "/processes",
    responses(
        (status = 200, description = "Available processes", body = ProcessList),
    ),
    tag = "processes"
)]
pub(crate) async fn list_processes(State(state): State<AppState>) -> Json<ProcessList> {
    Json(ProcessList {
        processes: state.registry.summaries(),
    })
}

/// GET /processes/{id} — Describe a process.
#[utoipa::path(
    get,
    path = "/processes/{id}",
    params(("id" = String, Path, description = "Process identifier")),
    responses(
        (status = 200, description = "Process description", content_type = "application/json"),
        (status = 404, description = "Unknown process", body = crate::error::ErrorBody),
    ),
    tag = "processes"
)]
pub(crate) async fn describe_process(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProcessDescription>, AppError> {
    let process: ProcessId = id.parse()?;
    Ok(Json(state.registry.get(process).clone()))
}

/// POST /processes/{id}/execution — Execute a process synchronously.
#[utoipa::path(
    post,
    path = "/processes/{id}/execution",
    params(("id" = String, Path, description = "Process identifier")),
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Process result, or {} when the output was not selected", content_type = "application/json"),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown process", body = crate::error::ErrorBody),
        (status = 422, description = "Inputs failed validation or resource has no id", body = crate::error::ErrorBody),
        (status = 502, description = "Source fetch or catalogue call failed", body = crate::error::ErrorBody),
    ),
    tag = "processes"
)]
pub(crate) async fn execute_process(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let process: ProcessId = id.parse()?;
    let req = extract_json(body)?;

    let result = state
        .reconciler
        .execute(process, &req.inputs, &req.selection())
        .await;
    state
        .metrics
        .record_execution(process.as_str(), outcome_label(&result));
    let output = result?;

    Ok(([(header::CONTENT_TYPE, output.mimetype)], Json(output.body)))
}

/// Metrics label for how an execution ended.
fn outcome_label(result: &Result<ProcessOutput, RegistrarError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(RegistrarError::Validation(_)) => "validation_error",
        Err(RegistrarError::MalformedDocument { .. }) => "malformed_document",
        Err(RegistrarError::Fetch(_)) => "fetch_failed",
        Err(RegistrarError::Catalogue(_)) => "catalogue_error",
        Err(RegistrarError::Encode(_)) => "internal_error",
    }
}
