//! Yandex ID Integration Module
//!
//! Client-side implementation of the Yandex ID OAuth 2.0
//! authorization-code and refresh-token flows, plus the user-info API.
//!
//! # Features
//!
//! - Authorization URL assembly (code and implicit response types)
//! - Authorization-code exchange and token refresh
//! - Token revocation
//! - Deterministic mapping of provider error codes to typed failures,
//!   keyed per operation
//! - Device id/name validation with non-fatal diagnostics
//! - User-info fetch in JSON, XML and JWT formats, with optional
//!   symmetric JWT verification (`jwt` feature)
//! - Avatar URL helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use yandex_id_integration::{oauth_config, AuthorizationParams, YandexOAuth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = oauth_config()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .redirect_uri("https://myapp.example/callback")
//!         .default_scope("login:info login:email")
//!         .build()?;
//!
//!     let client = YandexOAuth::new(config)?;
//!
//!     // Send the user here to complete consent in the browser.
//!     let url = client.authorization_url(&AuthorizationParams::default())?;
//!     println!("Authorize at: {url}");
//!
//!     // Back from the redirect with a verification code:
//!     let token = client.exchange_code("1234567", None, None).await?;
//!     println!("Access token expires in {}s", token.expires_in);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, authorization, token and user-info types
//! - `error`: error hierarchy and the provider error-code mapping
//! - `core`: HTTP transport abstraction and request validators
//! - `telemetry`: logging observer used for non-fatal warnings
//! - `builders`: fluent configuration builder
//! - `oauth`: OAuth client (authorize URL, exchange, refresh, revoke)
//! - `identity`: identity client (user info, JWT decode, avatars)
//! - `avatar`: avatar URL formatting

pub mod avatar;
pub mod builders;
pub mod core;
pub mod error;
pub mod identity;
pub mod oauth;
pub mod telemetry;
pub mod types;

// Re-export main clients
pub use identity::{YandexId, DEFAULT_LOGIN_BASE_URL};
pub use oauth::YandexOAuth;

// Re-export builders
pub use builders::{oauth_config, OAuthConfigBuilder};

// Re-export errors
pub use error::{
    map_exchange_error, map_refresh_error, map_revoke_error, parse_provider_error,
    ConfigurationError, NetworkError, ProtocolError, ProviderError, ProviderErrorResponse,
    ValidationError, YandexIdError, YandexIdResult,
};

#[cfg(feature = "jwt")]
pub use error::JwtError;

// Re-export types
pub use avatar::{avatar_url, AvatarSize};
pub use identity::UserInfoFormat;
pub use types::{
    AuthorizationParams, ClientCredentials, OAuthConfig, Phone, ResponseType, Sex, Token,
    User, DEFAULT_OAUTH_BASE_URL,
};

// Re-export core components
pub use core::{
    ignored_optional_scopes, validate_device_id, validate_device_name, HttpMethod,
    HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
    USER_AGENT,
};

// Re-export telemetry
pub use telemetry::{
    InMemoryLogger, LogContext, LogEntry, LogLevel, Logger, NoOpLogger, TracingLogger,
};
