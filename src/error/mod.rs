//! Error Types
//!
//! Error hierarchy for the Yandex ID integration, including the mapping
//! from provider-reported OAuth error codes to typed failures.

use std::time::Duration;
use thiserror::Error;

/// Root error type for the Yandex ID integration.
#[derive(Error, Debug)]
pub enum YandexIdError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[cfg(feature = "jwt")]
    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

impl YandexIdError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "YANDEX_ID_VALIDATION",
            Self::Provider(_) => "YANDEX_ID_PROVIDER",
            Self::Network(_) => "YANDEX_ID_NETWORK",
            Self::Protocol(_) => "YANDEX_ID_PROTOCOL",
            Self::Configuration(_) => "YANDEX_ID_CONFIG",
            #[cfg(feature = "jwt")]
            Self::Jwt(_) => "YANDEX_ID_JWT",
        }
    }

    /// Check if error requires re-authentication.
    pub fn needs_reauth(&self) -> bool {
        matches!(
            self,
            Self::Provider(ProviderError::InvalidGrant { .. })
                | Self::Provider(ProviderError::BadVerificationCode { .. })
        )
    }
}

/// Local request validation error, raised before any network call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid device id: {reason}")]
    InvalidDeviceId { reason: String },

    #[error("Invalid device name: {reason}")]
    InvalidDeviceName { reason: String },
}

/// Error reported by the OAuth provider in a response body.
///
/// Each variant carries the provider's `error_description` verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Authorization pending: {description}")]
    AuthorizationPending { description: String },

    #[error("Bad verification code: {description}")]
    BadVerificationCode { description: String },

    #[error("Invalid client credentials: {description}")]
    InvalidClient { description: String },

    #[error("Invalid grant: {description}")]
    InvalidGrant { description: String },

    #[error("Invalid request: {description}")]
    InvalidRequest { description: String },

    #[error("Invalid scope: {description}")]
    InvalidScope { description: String },

    #[error("Unauthorized client: {description}")]
    UnauthorizedClient { description: String },

    #[error("Unsupported grant type: {description}")]
    UnsupportedGrantType { description: String },

    #[error("OAuth error `{code}`: {description}")]
    Generic { code: String, description: String },
}

impl ProviderError {
    /// The provider's human-readable description, verbatim.
    pub fn description(&self) -> &str {
        match self {
            Self::AuthorizationPending { description }
            | Self::BadVerificationCode { description }
            | Self::InvalidClient { description }
            | Self::InvalidGrant { description }
            | Self::InvalidRequest { description }
            | Self::InvalidScope { description }
            | Self::UnauthorizedClient { description }
            | Self::UnsupportedGrantType { description }
            | Self::Generic { description, .. } => description,
        }
    }
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },
}

/// Protocol/response parsing error.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("HTTP client construction failed: {message}")]
    HttpClient { message: String },
}

/// JWT decoding error.
#[cfg(feature = "jwt")]
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Either client_secret or jwt_secret is required")]
    MissingSecret,

    #[error("JWT decode failed: {message}")]
    DecodeFailed { message: String },
}

/// Result type for Yandex ID operations.
pub type YandexIdResult<T> = Result<T, YandexIdError>;

/// OAuth error response body from the provider.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProviderErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ProviderErrorResponse {
    fn description(&self) -> String {
        self.error_description.clone().unwrap_or_default()
    }

    fn generic(&self) -> ProviderError {
        ProviderError::Generic {
            code: self.error.clone(),
            description: self.description(),
        }
    }
}

/// Map an error body from the authorization-code exchange.
///
/// The code sets are intentionally separate per operation: the provider
/// reports `authorization_pending`, `bad_verification_code` and
/// `invalid_scope` for the code exchange only.
pub fn map_exchange_error(response: &ProviderErrorResponse) -> ProviderError {
    let description = response.description();
    match response.error.as_str() {
        "authorization_pending" => ProviderError::AuthorizationPending { description },
        "bad_verification_code" => ProviderError::BadVerificationCode { description },
        "invalid_client" => ProviderError::InvalidClient { description },
        "invalid_grant" => ProviderError::InvalidGrant { description },
        "invalid_request" => ProviderError::InvalidRequest { description },
        "invalid_scope" => ProviderError::InvalidScope { description },
        "unauthorized_client" => ProviderError::UnauthorizedClient { description },
        "unsupported_grant_type" => ProviderError::UnsupportedGrantType { description },
        _ => response.generic(),
    }
}

/// Map an error body from the refresh-token exchange.
pub fn map_refresh_error(response: &ProviderErrorResponse) -> ProviderError {
    let description = response.description();
    match response.error.as_str() {
        "invalid_client" => ProviderError::InvalidClient { description },
        "invalid_grant" => ProviderError::InvalidGrant { description },
        "invalid_request" => ProviderError::InvalidRequest { description },
        "unauthorized_client" => ProviderError::UnauthorizedClient { description },
        "unsupported_grant_type" => ProviderError::UnsupportedGrantType { description },
        _ => response.generic(),
    }
}

/// Map an error body from token revocation.
///
/// Revocation never reports `invalid_grant`; an `invalid_grant` body here
/// falls through to [`ProviderError::Generic`].
pub fn map_revoke_error(response: &ProviderErrorResponse) -> ProviderError {
    let description = response.description();
    match response.error.as_str() {
        "invalid_client" => ProviderError::InvalidClient { description },
        "invalid_request" => ProviderError::InvalidRequest { description },
        "unauthorized_client" => ProviderError::UnauthorizedClient { description },
        _ => response.generic(),
    }
}

/// Parse a provider error response from an HTTP body, if it is one.
pub fn parse_provider_error(body: &str) -> Option<ProviderErrorResponse> {
    serde_json::from_str(body).ok()
}
