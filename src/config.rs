//! Client configuration
//!
//! Resolves credentials and endpoint settings from CLI flags and the
//! environment. Flags always take precedence over environment variables.

use crate::auth::{ApiToken, AuthConfig};
use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use crate::types::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use std::time::Duration;

/// Settings for talking to the Notion API
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Request pacing, `None` to disable
    pub rate_limit: Option<RateLimiterConfig>,
    /// Integration token
    pub token: ApiToken,
}

impl ClientSettings {
    /// Settings with defaults for everything but the token
    pub fn new(token: ApiToken) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            token,
        }
    }

    /// Resolve settings from flags, falling back to the process environment
    pub fn from_env(api_key: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let token = resolve_api_key(api_key, std::env::var(API_KEY_ENV).ok())?;
        let base_url = resolve_base_url(base_url, std::env::var(BASE_URL_ENV).ok())?;
        Ok(Self::new(token).with_base_url(base_url))
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the rate limit
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimiterConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Auth configuration for the HTTP client
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::bearer(self.token.clone())
    }
}

/// Pick the API key: flag first, then the environment value
pub fn resolve_api_key(flag: Option<&str>, env: Option<String>) -> Result<ApiToken> {
    let candidate = flag
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
        .or(env.filter(|v| !v.trim().is_empty()));

    match candidate {
        Some(value) => ApiToken::new(value),
        None => Err(Error::validation(format!(
            "Notion API key not provided. Set via --api-key flag or {API_KEY_ENV} environment variable."
        ))),
    }
}

/// Pick the base URL: flag first, then the environment value, then the default
pub fn resolve_base_url(flag: Option<&str>, env: Option<String>) -> Result<String> {
    let candidate = flag
        .map(String::from)
        .or(env)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let parsed = url::Url::parse(candidate.trim())
        .map_err(|e| Error::config(format!("Invalid API base URL '{candidate}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "API base URL must use http or https, got '{candidate}'"
        )));
    }

    Ok(candidate.trim().trim_end_matches('/').to_string())
}
