//! Client configuration.
//!
//! # Responsibility
//! - Resolve API endpoints, cache location and logging settings.
//! - Log every default that gets applied.
//!
//! # Invariants
//! - The fallback endpoint is fixed and never configurable.
//! - Loading never panics; blank values count as unset.

use log::info;
use std::env;
use std::path::PathBuf;

/// Used when `VEGGIEMAP_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
/// Second step of the retrieval chain.
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_CACHE_FILE_NAME: &str = "veggiemap_cache.sqlite3";

pub const API_URL_ENV: &str = "VEGGIEMAP_API_URL";
pub const CACHE_PATH_ENV: &str = "VEGGIEMAP_CACHE_PATH";
pub const LOG_LEVEL_ENV: &str = "VEGGIEMAP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "VEGGIEMAP_LOG_DIR";

/// Base URLs tried by the retrieval chain, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub primary: String,
    pub fallback: String,
}

impl Endpoints {
    /// Uses `primary` when given, else the local default.
    pub fn new(primary: Option<String>) -> Self {
        Self {
            primary: primary.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            fallback: FALLBACK_API_BASE_URL.to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub cache_path: PathBuf,
    /// `None` means the build-mode default from `logging::default_log_level`.
    pub log_level: Option<String>,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let primary = read(API_URL_ENV);
        if primary.is_none() {
            info!("{API_URL_ENV} not set, using default: {DEFAULT_API_BASE_URL}");
        }

        let cache_path = read(CACHE_PATH_ENV).map(PathBuf::from).unwrap_or_else(|| {
            let path = env::temp_dir().join(DEFAULT_CACHE_FILE_NAME);
            info!("{CACHE_PATH_ENV} not set, using default: {}", path.display());
            path
        });

        Self {
            endpoints: Endpoints::new(primary),
            cache_path,
            log_level: read(LOG_LEVEL_ENV),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
