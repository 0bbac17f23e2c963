//! HTTP client configuration.
//!
//! Timeouts and identification for outbound calls. Override via environment
//! variables or explicit construction for testing.

use zeroize::Zeroizing;

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("registrar/", env!("CARGO_PKG_VERSION"));

/// Configuration for the outbound HTTP clients.
///
/// Custom `Debug` implementation redacts the `catalogue_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Per-request timeout in seconds, covering connect through body read.
    pub timeout_secs: u64,
    /// `User-Agent` sent on every request.
    pub user_agent: String,
    /// Bearer token attached to catalogue calls only, never to source fetches.
    pub catalogue_token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "catalogue_token",
                &self.catalogue_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            catalogue_token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REGISTRAR_HTTP_TIMEOUT_SECS` (default: 30)
    /// - `REGISTRAR_USER_AGENT` (default: `registrar/<version>`)
    /// - `REGISTRAR_CATALOGUE_TOKEN` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs = match lookup("REGISTRAR_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            timeout_secs,
            user_agent: lookup("REGISTRAR_USER_AGENT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            catalogue_token: lookup("REGISTRAR_CATALOGUE_TOKEN")
                .filter(|s| !s.is_empty())
                .map(Zeroizing::new),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: "REGISTRAR_HTTP_TIMEOUT_SECS".into(),
        reason: format!("\"{raw}\" is not a whole number of seconds"),
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            var: "REGISTRAR_HTTP_TIMEOUT_SECS".into(),
            reason: "timeout must be at least one second".into(),
        });
    }
    Ok(secs)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}
