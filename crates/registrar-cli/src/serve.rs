//! # Serve Subcommand
//!
//! Runs the HTTP service in the foreground.

use anyhow::{Context, Result};
use clap::Args;
use registrar_api::state::{AppConfig, AppState};
use registrar_process::DeletePolicy;

/// Arguments for `registrar serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides `REGISTRAR_PORT`).
    #[arg(long)]
    pub port: Option<u16>,

    /// Delete failure policy (overrides `REGISTRAR_DELETE_POLICY`).
    #[arg(long)]
    pub delete_policy: Option<DeletePolicy>,
}

impl ServeArgs {
    /// Apply flag overrides on top of the environment configuration.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(policy) = self.delete_policy {
            config.delete_policy = policy;
        }
        config
    }
}

/// Execute the serve subcommand. Returns only on bind or server failure.
pub async fn run_serve(args: &ServeArgs) -> Result<u8> {
    let config = args.apply(AppConfig::from_env().context("invalid configuration")?);
    let state = AppState::from_config(&config).context("failed to initialise application")?;

    tracing::info!(
        port = config.port,
        delete_policy = %config.delete_policy,
        "starting registration API"
    );
    registrar_api::serve(state, config.port)
        .await
        .context("server error")?;
    Ok(0)
}
