//! Configuration Types
//!
//! OAuth client configuration.

use secrecy::SecretString;
use std::time::Duration;

/// Default OAuth endpoint base URL.
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://oauth.yandex.ru";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth client configuration.
#[derive(Clone, Debug)]
pub struct OAuthConfig {
    /// Client credentials.
    pub credentials: ClientCredentials,
    /// OAuth endpoint base URL (authorize, token and revoke endpoints).
    pub base_url: String,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl OAuthConfig {
    /// Create a configuration with the provider's default endpoints.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_OAUTH_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client credentials issued at application registration.
///
/// Immutable for the lifetime of the client that owns them.
#[derive(Clone)]
pub struct ClientCredentials {
    /// Client identifier.
    pub client_id: String,
    /// Client secret.
    pub client_secret: SecretString,
    /// Redirect URI registered for the application.
    pub redirect_uri: String,
    /// Scope granted to the application, used as the default for
    /// optional-scope validation.
    pub default_scope: Option<String>,
}

impl ClientCredentials {
    /// Create new credentials.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            redirect_uri: redirect_uri.into(),
            default_scope: None,
        }
    }

    /// Set the default scope.
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = Some(scope.into());
        self
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("default_scope", &self.default_scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OAuthConfig::new(ClientCredentials::new("id", "secret", "https://cb"));
        assert_eq!(config.base_url, DEFAULT_OAUTH_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.credentials.default_scope.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials =
            ClientCredentials::new("id", "super-secret", "https://cb").with_default_scope("login:info");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}
