//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPFRONT_API_URL` - Catalog base URL (default: `https://dummyjson.com/products`)
//! - `SHOPFRONT_DATA_DIR` - Directory holding the local account store
//!   (default: `<platform data dir>/shopfront`)
//! - `SHOPFRONT_CACHE_TTL_SECS` - Category/detail cache lifetime, 0 disables (default: 300)
//! - `SHOPFRONT_CIPHER_SECRET` - Shared secret for the password cipher
//!   (default: the key embedded in the application)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Catalog the application was built against.
pub const DEFAULT_API_URL: &str = "https://dummyjson.com/products";

/// Shared secret embedded in the application for the password cipher.
///
/// Every install uses the same value unless overridden, which is why the
/// cipher is an obfuscation and not a credential store.
pub const EMBEDDED_CIPHER_SECRET: &str = "secret-key";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DATA_DIR_NAME: &str = "shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No data directory available; set SHOPFRONT_DATA_DIR")]
    NoDataDir,
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote catalog API
    pub api_url: Url,
    /// Directory for the local key-value store
    pub data_dir: PathBuf,
    /// Lifetime of cached category and detail responses (zero disables caching)
    pub cache_ttl: Duration,
    /// Shared secret for the reversible password cipher
    pub cipher_secret: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_url", &self.api_url.as_str())
            .field("data_dir", &self.data_dir)
            .field("cache_ttl", &self.cache_ttl)
            .field("cipher_secret", &"[REDACTED]")
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if no
    /// data directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SHOPFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&api_url)?;

        let data_dir = match lookup("SHOPFRONT_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .map(|dir| dir.join(DATA_DIR_NAME))
                .ok_or(ConfigError::NoDataDir)?,
        };

        let cache_ttl = match lookup("SHOPFRONT_CACHE_TTL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_CACHE_TTL_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let cipher_secret = lookup("SHOPFRONT_CIPHER_SECRET")
            .unwrap_or_else(|| EMBEDDED_CIPHER_SECRET.to_string());
        if cipher_secret.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_CIPHER_SECRET".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            data_dir,
            cache_ttl: Duration::from_secs(cache_ttl),
            cipher_secret: SecretString::from(cipher_secret),
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Configuration for tests and embedding: given catalog URL and data
    /// directory, everything else at its default.
    #[must_use]
    pub fn with_defaults(api_url: Url, data_dir: PathBuf) -> Self {
        Self {
            api_url,
            data_dir,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cipher_secret: SecretString::from(EMBEDDED_CIPHER_SECRET),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Whether the password cipher uses the key embedded in the application.
    #[must_use]
    pub fn uses_embedded_secret(&self) -> bool {
        self.cipher_secret.expose_secret() == EMBEDDED_CIPHER_SECRET
    }
}

/// Parse the catalog base URL, dropping any trailing slash so endpoint paths
/// can be appended verbatim.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SHOPFRONT_API_URL".to_string(), msg);

    let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() {
        return Err(invalid("must not contain a query string".to_string()));
    }
    Ok(url)
}
