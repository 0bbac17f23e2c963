//! # registrar-cli — CLI for the Registration Gateway
//!
//! Provides the `registrar` command:
//!
//! - `registrar serve` — run the HTTP service.
//! - `registrar register` / `registrar deregister` — run one process
//!   against a catalogue and print the result.
//! - `registrar validate` — check a request document offline.
//! - `registrar processes` — print process metadata.
//!
//! ```bash
//! registrar register --type item \
//!     --source https://example.org/items/abc123.json \
//!     --target http://resource-catalogue:5002
//! registrar validate --process deregistrar request.json
//! ```

pub mod execute;
pub mod processes;
pub mod serve;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read and parse a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Print a JSON value, pretty-printed, to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
