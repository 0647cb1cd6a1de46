//! Configuration Builder
//!
//! Fluent builder for the OAuth client configuration.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::{ConfigurationError, YandexIdError};
use crate::types::{ClientCredentials, OAuthConfig, DEFAULT_OAUTH_BASE_URL, DEFAULT_TIMEOUT};

/// OAuth configuration builder.
pub struct OAuthConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    redirect_uri: Option<String>,
    default_scope: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl Default for OAuthConfigBuilder {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            default_scope: None,
            base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OAuthConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the scope granted to the application.
    pub fn default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = Some(scope.into());
        self
    }

    /// Override the OAuth endpoint base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<OAuthConfig, YandexIdError> {
        let client_id = self.client_id.ok_or_else(|| missing("client_id"))?;
        let client_secret = self.client_secret.ok_or_else(|| missing("client_secret"))?;
        let redirect_uri = self.redirect_uri.ok_or_else(|| missing("redirect_uri"))?;

        if Url::parse(&self.base_url).is_err() {
            return Err(ConfigurationError::InvalidEndpoint {
                url: self.base_url,
            }
            .into());
        }

        Ok(OAuthConfig {
            credentials: ClientCredentials {
                client_id,
                client_secret,
                redirect_uri,
                default_scope: self.default_scope,
            },
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

fn missing(field: &str) -> YandexIdError {
    ConfigurationError::MissingField {
        field: field.to_string(),
    }
    .into()
}

/// Create a new configuration builder.
pub fn oauth_config() -> OAuthConfigBuilder {
    OAuthConfigBuilder::new()
}
