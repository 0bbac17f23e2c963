//! # Output Selection
//!
//! Callers may name the outputs they want returned. An empty selection
//! asks for everything; so does the legacy `echo` marker. Any other
//! selection that does not name a process's own output suppresses its body
//! while the side effect still happens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Output identifier that always requests the full result body.
pub const ECHO_OUTPUT: &str = "echo";

/// The set of output identifiers a caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSelection(BTreeSet<String>);

impl OutputSelection {
    /// No explicit selection: every output is returned.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select the given output identifiers.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Whether the caller made no explicit selection.
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the body of `output_id` should be returned.
    pub fn includes(&self, output_id: &str) -> bool {
        self.is_unrestricted() || self.0.contains(ECHO_OUTPUT) || self.0.contains(output_id)
    }

    /// Iterate the selected identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OutputSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
