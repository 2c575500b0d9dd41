//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for router behavior.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_BASE_PATH`
//!
//! Mount prefix stripped from incoming URIs before matching, e.g. `/api`.
//! Unset or empty means no prefix.
//!
//! ### `BRRTR_SLOW_MATCH_US`
//!
//! Matching that takes longer than this many microseconds is logged at WARN
//! instead of DEBUG. Default: `1000` (1 ms).
//!
//! ## Usage
//!
//! ```rust
//! use brrtmatch::runtime_config::RuntimeConfig;
//! use brrtmatch::router::Router;
//!
//! let config = RuntimeConfig::from_env();
//! let router: Router<()> = Router::with_config(&config);
//! ```

use std::env;
use std::time::Duration;

/// Default slow-match threshold in microseconds
pub const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Mount prefix stripped from request URIs
    pub base_path: Option<String>,
    /// Matching slower than this is logged as a warning
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_path = lookup("BRRTR_BASE_PATH")
            .map(|v| v.trim().trim_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let slow_match_us = lookup("BRRTR_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            base_path,
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}
