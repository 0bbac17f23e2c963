//! Result shaping.
//!
//! Both processes hand their typed result to [`ProcessOutput::shape`],
//! which applies the caller's [`OutputSelection`]. A suppressed body is an
//! empty object, never an error: the catalogue write has already happened.

use registrar_core::{OutputSelection, RegistrarError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Media type of every process result.
pub const RESULT_MEDIA_TYPE: &str = "application/json";

/// A shaped process result: media type plus body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessOutput {
    /// Always [`RESULT_MEDIA_TYPE`].
    pub mimetype: &'static str,
    /// Full result, or `{}` when the selection excludes this process's output.
    pub body: Value,
}

impl ProcessOutput {
    /// Shape `result` for a process whose own output is `output_id`.
    pub fn shape<T: Serialize>(
        result: &T,
        output_id: &str,
        selection: &OutputSelection,
    ) -> Result<Self, RegistrarError> {
        let body = if selection.includes(output_id) {
            serde_json::to_value(result).map_err(RegistrarError::Encode)?
        } else {
            tracing::debug!(output_id, "output not selected, returning empty body");
            Value::Object(Map::new())
        };
        Ok(Self {
            mimetype: RESULT_MEDIA_TYPE,
            body,
        })
    }

    /// Whether the body was suppressed by output selection.
    pub fn is_empty(&self) -> bool {
        self.body.as_object().is_some_and(Map::is_empty)
    }
}
