//! Fetcher configuration: credential, endpoint, output directory, timeouts.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_BASE, READ_TIMEOUT_SECS, TIMEOUT_RANGE_SECS,
};

/// Provider API key.
///
/// `Debug` is redacted so the key never reaches logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key. Blank input yields `None`.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the key for use in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Errors raised while validating a [`FetcherConfig`] or building its client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API base URL could not be parsed.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidApiBase {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timeout is outside the accepted range.
    #[error("invalid value for `{field}`: {value}. Expected range: 1..=3600")]
    InvalidTimeout {
        /// The config field name.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    HttpClient {
        /// Why construction failed.
        reason: String,
    },
}

/// Everything a [`Fetcher`](super::Fetcher) needs, injected at construction.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Provider API key. `None` makes every download fail with `MissingCredential`.
    pub api_key: Option<ApiKey>,
    /// Base URL of the provider API, without trailing slash.
    pub api_base: String,
    /// Directory that `ToDisk` downloads are written into.
    pub output_dir: PathBuf,
    /// Connect timeout for both lookup and fetch.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for both lookup and fetch.
    pub read_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("."),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

impl FetcherConfig {
    /// Creates a default config with the given API key.
    #[must_use]
    pub fn with_api_key(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Overrides the API base URL (used to point at a stub server).
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the `ToDisk` output directory.
    #[must_use]
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Overrides both timeouts.
    #[must_use]
    pub fn timeouts(mut self, connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self.read_timeout_secs = read_timeout_secs;
        self
    }

    /// Validates values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable API base or out-of-range timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.api_base).map_err(|e| ConfigError::InvalidApiBase {
            value: self.api_base.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiBase {
                value: self.api_base.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }

    /// Lookup endpoint for a resource ID.
    pub(crate) fn lookup_url(&self, resource_id: &str) -> String {
        format!(
            "{}/resources/{resource_id}/download",
            self.api_base.trim_end_matches('/')
        )
    }
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if TIMEOUT_RANGE_SECS.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout { field, value })
    }
}
