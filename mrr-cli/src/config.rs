//! Configuration management for mrr-cli.
//!
//! Configuration is read once at startup from the environment (optionally
//! seeded from a `.env` file) or from command-line flags. A configuration
//! that fails validation stops the process before any request is signed.

use std::path::Path;

use reqwest::Url;

use crate::auth::Credentials;
use crate::error::{Error, Result};

pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_SECRET: &str = "API_SECRET";

/// Raw configuration values before validation.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl RawConfig {
    /// Read `API_BASE_URL`, `API_KEY`, and `API_SECRET` from the process
    /// environment. Unset or non-UTF-8 variables become `None`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_BASE_URL).ok(),
            api_key: std::env::var(ENV_API_KEY).ok(),
            api_secret: std::env::var(ENV_API_SECRET).ok(),
        }
    }

    /// Apply command-line values on top of these.
    ///
    /// A flag that was given wins over the environment. There is no flag for
    /// the secret, so it always comes from the environment.
    pub fn with_overrides(self, base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.or(self.base_url),
            api_key: api_key.or(self.api_key),
            api_secret: self.api_secret,
        }
    }
}

/// Load variables from a dotenv file into the process environment.
///
/// With an explicit path the file must exist. Without one, `.env` is looked
/// up from the working directory and silently skipped if absent. Variables
/// already set in the environment are not overwritten.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .map_err(|e| Error::Config(format!("failed to load {}: {e}", path.display())))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API root, e.g. `https://www.miningrigrentals.com/api/v2`, without a
    /// trailing slash
    pub base_url: String,

    pub credentials: Credentials,
}

impl Config {
    /// Validate explicit configuration values.
    pub fn new(
        base_url: impl AsRef<str>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: validate_base_url(base_url.as_ref())?,
            credentials: Credentials::new(api_key, api_secret)?,
        })
    }

    /// Validate raw values, naming the environment variable for anything
    /// that is missing.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let base_url = raw.base_url.ok_or_else(|| missing(ENV_BASE_URL))?;
        let api_key = raw.api_key.ok_or_else(|| missing(ENV_API_KEY))?;
        let api_secret = raw.api_secret.ok_or_else(|| missing(ENV_API_SECRET))?;
        Self::new(base_url, api_key, api_secret)
    }

    /// Validate configuration taken from the process environment alone.
    pub fn from_env() -> Result<Self> {
        Self::from_raw(RawConfig::from_env())
    }
}

fn missing(var: &str) -> Error {
    Error::Config(format!("{var} is not set"))
}

fn validate_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("invalid base URL {trimmed:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::Config(format!(
                "base URL must use http or https, not {other}"
            )))
        }
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config(
            "base URL must not carry a query string or fragment".into(),
        ));
    }

    Ok(trimmed.to_string())
}
