//! # Processes Subcommand
//!
//! Prints the same process metadata the HTTP service advertises.

use anyhow::{Context, Result};
use clap::Args;
use registrar_process::{ProcessId, ProcessRegistry};
use registrar_schema::SchemaValidator;
use serde_json::Value;

/// Arguments for `registrar processes`.
#[derive(Args, Debug)]
pub struct ProcessesArgs {
    /// Describe one process in full instead of listing all.
    #[arg(value_name = "ID")]
    pub id: Option<String>,
}

/// Execute the processes subcommand.
pub fn run_processes(args: &ProcessesArgs) -> Result<u8> {
    crate::print_json(&render(args)?)?;
    Ok(0)
}

fn render(args: &ProcessesArgs) -> Result<Value> {
    let schemas = SchemaValidator::new().context("failed to compile request schemas")?;
    let registry = ProcessRegistry::new(&schemas);

    let value = match &args.id {
        Some(id) => {
            let process: ProcessId = id.parse()?;
            serde_json::to_value(registry.get(process))?
        }
        None => serde_json::json!({ "processes": registry.summaries() }),
    };
    Ok(value)
}
