//! # Validate Subcommand
//!
//! Checks a request document against a process's input schema without
//! contacting any catalogue or resource origin. Every violation is
//! printed, one per line, with its JSON Pointer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use registrar_process::ProcessId;
use registrar_schema::SchemaValidator;
use serde_json::Value;

/// Arguments for `registrar validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Process whose inputs the document should satisfy.
    #[arg(long, default_value = "registrar")]
    pub process: String,

    /// JSON request document. An `{"inputs": {...}}` execution body is
    /// accepted too; its `inputs` are validated.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 on violations.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let process: ProcessId = args.process.parse()?;
    let validator = SchemaValidator::new().context("failed to compile request schemas")?;
    let document = crate::read_json(&args.path)?;

    let issues = validator.validate(process.schema(), inputs_of(&document));
    if issues.is_empty() {
        println!("OK: {} is a valid {process} request", args.path.display());
        return Ok(0);
    }

    println!(
        "FAIL: {} has {} violation(s) of the {process} schema",
        args.path.display(),
        issues.len()
    );
    for issue in &issues {
        println!("  {issue}");
    }
    Ok(1)
}

fn inputs_of(document: &Value) -> &Value {
    match document.get("inputs") {
        Some(inputs) if inputs.is_object() => inputs,
        _ => document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(process: &str, file: &tempfile::NamedTempFile) -> ValidateArgs {
        ValidateArgs {
            process: process.into(),
            path: file.path().to_path_buf(),
        }
    }

    #[test]
    fn valid_deregister_request() {
        let file = file_with(r#"{"id": "abc123", "target": "http://cat:5002"}"#);
        assert_eq!(run_validate(&args("deregistrar", &file)).unwrap(), 0);
    }

    #[test]
    fn execution_body_inputs_are_unwrapped() {
        let file = file_with(
            r#"{"inputs": {"type": "item", "source": "https://h/x.json", "target": "http://cat:5002"}}"#,
        );
        assert_eq!(run_validate(&args("registrar", &file)).unwrap(), 0);
    }

    #[test]
    fn invalid_request_exits_one() {
        let file = file_with(r#"{"type": "item"}"#);
        assert_eq!(run_validate(&args("registrar", &file)).unwrap(), 1);
    }

    #[test]
    fn unknown_process_is_an_error() {
        let file = file_with("{}");
        assert!(run_validate(&args("echo", &file)).is_err());
    }

    #[test]
    fn non_json_file_is_an_error() {
        let file = file_with("not json");
        assert!(run_validate(&args("registrar", &file)).is_err());
    }
}
