//! Delete failure policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What deregistration does when the catalogue rejects a delete.
///
/// A delete answered with "not found" is success under either policy: the
/// item is gone, which is what the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeletePolicy {
    /// Report the failure to the caller as a catalogue error.
    #[default]
    Surface,
    /// Log the failure at error level and report success.
    LogOnly,
}

impl DeletePolicy {
    /// Configuration spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::LogOnly => "log-only",
        }
    }
}

impl std::fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised delete policy name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown delete policy \"{0}\" (expected \"surface\" or \"log-only\")")]
pub struct UnknownPolicy(pub String);

impl FromStr for DeletePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(Self::Surface),
            "log-only" | "log_only" | "logonly" => Ok(Self::LogOnly),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("surface".parse::<DeletePolicy>().unwrap(), DeletePolicy::Surface);
        assert_eq!("log-only".parse::<DeletePolicy>().unwrap(), DeletePolicy::LogOnly);
        assert_eq!(" LOG_ONLY ".parse::<DeletePolicy>().unwrap(), DeletePolicy::LogOnly);
    }

    #[test]
    fn rejects_unknown() {
        let err = "ignore".parse::<DeletePolicy>().unwrap_err();
        assert!(err.to_string().contains("ignore"));
    }

    #[test]
    fn default_surfaces_failures() {
        assert_eq!(DeletePolicy::default(), DeletePolicy::Surface);
        assert_eq!(DeletePolicy::default().to_string(), "surface");
    }
}
