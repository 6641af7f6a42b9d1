//! Process configuration for the Kan client.
//!
//! Everything is read from the environment once, at startup:
//!
//! | Variable       | Required | Meaning                                      |
//! |----------------|----------|----------------------------------------------|
//! | `KAN_API_KEY`  | yes      | Credential sent as the `x-api-key` header    |
//! | `KAN_DEBUG`    | no       | `1`/`true`/`yes`/`on` enables request traces |
//! | `KAN_BASE_URL` | no       | Overrides [`DEFAULT_BASE_URL`]               |

use crate::error::{Error, Result};

/// Base URL of the Kan REST API.
pub const DEFAULT_BASE_URL: &str = "https://board.local.gum.zone/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "KAN_API_KEY";

/// Environment variable toggling request tracing.
pub const DEBUG_VAR: &str = "KAN_DEBUG";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "KAN_BASE_URL";

/// Immutable client configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct KanConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Whether request tracing is enabled.
    pub debug: bool,
}

impl KanConfig {
    /// Create a configuration for the default base URL with tracing off.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
        }
    }

    /// Point the client at a different Kan deployment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Enable or disable request tracing.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `KAN_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no usable API key is found.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{API_KEY_VAR} environment variable is required")))?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), |url| normalize_base_url(&url));

        Ok(Self {
            api_key,
            base_url,
            debug: parse_debug_flag(lookup(DEBUG_VAR).as_deref()),
        })
    }
}

// The API key never shows up in logs or panics.
impl std::fmt::Debug for KanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Interpret a debug flag value.
///
/// Trimmed and case-insensitive: `1`, `true`, `yes` and `on` enable tracing,
/// anything else (including an unset variable) disables it.
#[must_use]
pub fn parse_debug_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// Read `KAN_DEBUG` from the environment.
#[must_use]
pub fn debug_enabled_from_env() -> bool {
    parse_debug_flag(std::env::var(DEBUG_VAR).ok().as_deref())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
