//! # registrar-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from `REGISTRAR_*`
//! environment variables; see [`registrar_api::state::AppConfig::from_env`].

use anyhow::Context;
use registrar_api::state::{AppConfig, AppState};
use registrar_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    telemetry::init(telemetry::env_filter("info"), config.log_format);
    tracing::debug!(?config, "loaded configuration");

    let state = AppState::from_config(&config).context("failed to initialise application")?;
    tracing::info!(delete_policy = %config.delete_policy, "processes ready");

    registrar_api::serve(state, config.port)
        .await
        .context("server error")
}
