//! Auth configuration types

use crate::error::{Error, Result};

/// Integration token for the Notion API
///
/// The value is redacted from `Debug` output so it never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a token, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("API key cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The integration token
        token: ApiToken,
    },
}

impl AuthConfig {
    /// Bearer auth from a token
    pub fn bearer(token: ApiToken) -> Self {
        AuthConfig::Bearer { token }
    }
}
