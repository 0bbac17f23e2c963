//! # Register and Deregister Subcommands
//!
//! Run one process invocation against a catalogue with the same
//! reconciler the HTTP service uses, then print the shaped result.
//! Client settings come from the `REGISTRAR_*` environment; flags given
//! here take precedence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use registrar_api::state::{AppConfig, AppState};
use registrar_core::OutputSelection;
use registrar_process::{DeletePolicy, ProcessId};
use serde_json::{json, Value};

/// Arguments for `registrar register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Resource type tag (e.g. `item`).
    #[arg(long = "type", value_name = "TYPE")]
    pub resource_type: String,

    /// Source URL, or `@PATH` to register a local JSON document inline.
    #[arg(long)]
    pub source: String,

    /// Base URL of the target records catalogue.
    #[arg(long, env = "REGISTRAR_TARGET")]
    pub target: String,

    /// Output to return; repeat for several. Omit for the full result.
    #[arg(long = "output", value_name = "ID")]
    pub outputs: Vec<String>,
}

/// Arguments for `registrar deregister`.
#[derive(Args, Debug)]
pub struct DeregisterArgs {
    /// Identifier of the resource to remove.
    #[arg(long)]
    pub id: String,

    /// Base URL of the target records catalogue.
    #[arg(long, env = "REGISTRAR_TARGET")]
    pub target: String,

    /// Output to return; repeat for several. Omit for the full result.
    #[arg(long = "output", value_name = "ID")]
    pub outputs: Vec<String>,

    /// Override the delete failure policy (`surface` or `log-only`).
    #[arg(long)]
    pub delete_policy: Option<DeletePolicy>,
}

impl RegisterArgs {
    /// Build the process inputs. `@PATH` sources are read and inlined.
    pub fn inputs(&self) -> Result<Value> {
        let source = match self.source.strip_prefix('@') {
            Some(path) => crate::read_json(&PathBuf::from(path))?,
            None => Value::String(self.source.clone()),
        };
        Ok(json!({
            "type": self.resource_type,
            "source": source,
            "target": self.target,
        }))
    }
}

impl DeregisterArgs {
    /// Build the process inputs.
    pub fn inputs(&self) -> Value {
        json!({"id": self.id, "target": self.target})
    }
}

/// Execute `registrar register`.
pub async fn run_register(args: &RegisterArgs) -> Result<u8> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    run(ProcessId::Registrar, config, args.inputs()?, &args.outputs).await
}

/// Execute `registrar deregister`.
pub async fn run_deregister(args: &DeregisterArgs) -> Result<u8> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(policy) = args.delete_policy {
        config.delete_policy = policy;
    }
    run(ProcessId::Deregistrar, config, args.inputs(), &args.outputs).await
}

async fn run(process: ProcessId, config: AppConfig, inputs: Value, outputs: &[String]) -> Result<u8> {
    let state = AppState::from_config(&config).context("failed to initialise clients")?;
    let selection = OutputSelection::from_ids(outputs.iter().cloned());

    match state.reconciler.execute(process, &inputs, &selection).await {
        Ok(output) => {
            crate::print_json(&output.body)?;
            Ok(0)
        }
        Err(e) => {
            eprintln!("{process} failed: {e}");
            if let Some(issues) = e.issues() {
                for issue in issues {
                    eprintln!("  {issue}");
                }
            }
            Ok(1)
        }
    }
}
