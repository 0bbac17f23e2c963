//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Everything here is immutable after startup: the reconciler (with its
//! HTTP clients and compiled schemas) and the process registry. The only
//! durable state of the gateway lives in the catalogue.

use std::sync::Arc;

use registrar_client::{ClientConfig, ClientError, RegistrarClient};
use registrar_process::{DeletePolicy, ProcessRegistry, Reconciler, UnknownPolicy};
use registrar_schema::{SchemaError, SchemaValidator};
use thiserror::Error;

use crate::middleware::metrics::ApiMetrics;
use crate::telemetry::LogFormat;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// What a rejected catalogue delete means to the caller.
    pub delete_policy: DeletePolicy,
    /// Log output format.
    pub log_format: LogFormat,
    /// Outbound HTTP client settings.
    pub client: ClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            delete_policy: DeletePolicy::default(),
            log_format: LogFormat::default(),
            client: ClientConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGISTRAR_PORT` (default: 5000)
    /// - `REGISTRAR_DELETE_POLICY` (`surface` | `log-only`, default: `surface`)
    /// - `REGISTRAR_LOG_FORMAT` (`text` | `json`, default: `text`)
    /// - everything read by [`ClientConfig::from_env`]
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let port = match lookup("REGISTRAR_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| StartupError::InvalidValue {
                var: "REGISTRAR_PORT",
                reason: format!("\"{raw}\" is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };

        let delete_policy = match lookup("REGISTRAR_DELETE_POLICY") {
            Some(raw) => raw.parse()?,
            None => DeletePolicy::default(),
        };

        let log_format = match lookup("REGISTRAR_LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|reason| StartupError::InvalidValue {
                var: "REGISTRAR_LOG_FORMAT",
                reason,
            })?,
            None => LogFormat::default(),
        };

        let client = ClientConfig::from_lookup(&lookup)
            .map_err(|e| StartupError::Client(ClientError::Config(e)))?;

        Ok(Self {
            port,
            delete_policy,
            log_format,
            client,
        })
    }
}

/// Errors assembling the application.
#[derive(Error, Debug)]
pub enum StartupError {
    /// A configuration variable has an unusable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    /// Unrecognised delete policy.
    #[error(transparent)]
    DeletePolicy(#[from] UnknownPolicy),

    /// The embedded schemas failed to compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The HTTP clients could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The metrics registry could not be set up.
    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub reconciler: Reconciler,
    pub registry: Arc<ProcessRegistry>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Assemble state from explicit parts.
    pub fn new(reconciler: Reconciler, registry: ProcessRegistry, metrics: ApiMetrics) -> Self {
        Self {
            reconciler,
            registry: Arc::new(registry),
            metrics,
        }
    }

    /// Build the HTTP clients, compile the schemas and wire the reconciler.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let schemas = Arc::new(SchemaValidator::new()?);
        let client = RegistrarClient::new(config.client.clone())?;
        let registry = ProcessRegistry::new(&schemas);

        let reconciler = Reconciler::new(
            Arc::new(client.records().clone()),
            Arc::new(client.fetcher().clone()),
            schemas,
        )
        .with_delete_policy(config.delete_policy);

        Ok(Self::new(reconciler, registry, ApiMetrics::new()?))
    }
}
