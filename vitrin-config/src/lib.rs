//! Process-start configuration resolution.
//!
//! Three environment slots feed the core: the master-key secret, the
//! document store connection string, and the cache connection string. Each
//! is read exactly once at startup; nothing in the core re-reads the
//! environment afterwards.
//!
//! A slot that is set but empty is a configuration error and fatal; there
//! is no degraded mode for a half-configured process. An *absent* master-key
//! slot is not an error here: key durability policy belongs to the key
//! provider, which synthesizes an ephemeral key and says so.

use std::env;
use thiserror::Error;

/// Environment variable holding the master-key secret.
pub const MASTER_KEY_VAR: &str = "VITRIN_MASTER_KEY";
/// Environment variable holding the document store connection string.
pub const STORE_URL_VAR: &str = "VITRIN_STORE_URL";
/// Environment variable holding the cache connection string.
pub const CACHE_URL_VAR: &str = "VITRIN_CACHE_URL";

const DEFAULT_STORE_URL: &str = "mongodb://localhost:27017/vitrin";
const DEFAULT_CACHE_URL: &str = "redis://localhost:6379/0";

/// Result type for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that make the process unable to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A slot was set to an empty or whitespace-only value. Distinct from
    /// absent: an operator wrote something, and it is unusable.
    #[error("configuration variable {0} is set but empty")]
    Empty(&'static str),

    /// A slot exists but its value is not valid Unicode.
    #[error("configuration variable {0} is not valid UTF-8")]
    NotUnicode(&'static str),
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The master-key secret, if one was configured. `None` means the key
    /// provider will synthesize an ephemeral key.
    pub master_key_secret: Option<String>,
    /// Document store connection string.
    pub store_url: String,
    /// Cache service connection string.
    pub cache_url: String,
}

impl Settings {
    /// Resolves settings from the process environment.
    ///
    /// Connection strings fall back to local development endpoints when
    /// absent; the master key has no fallback value by design.
    pub fn from_env() -> ConfigResult<Self> {
        let master_key_secret = read_optional(MASTER_KEY_VAR)?;
        let store_url =
            read_optional(STORE_URL_VAR)?.unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let cache_url =
            read_optional(CACHE_URL_VAR)?.unwrap_or_else(|| DEFAULT_CACHE_URL.to_string());

        Ok(Self {
            master_key_secret,
            store_url,
            cache_url,
        })
    }
}

/// Reads one slot. Absent is `None`; set-but-empty is an error.
fn read_optional(var: &'static str) -> ConfigResult<Option<String>> {
    match env::var(var) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ConfigError::Empty(var))
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(var)),
    }
}
