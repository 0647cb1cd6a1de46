//! Identity Client
//!
//! Fetches the authenticated user's profile from the login endpoint in
//! one of several formats, optionally decoding the JWT representation
//! when a symmetric secret is supplied. Verification against provider
//! signing keys is out of scope; no keys are ever fetched or cached.

use std::sync::Arc;

use url::Url;

use crate::avatar;
use crate::core::{HttpRequest, HttpTransport, ReqwestHttpTransport};
use crate::error::{ConfigurationError, ProtocolError, YandexIdResult};
use crate::telemetry::{LogContext, Logger, TracingLogger};
use crate::types::User;

#[cfg(feature = "jwt")]
use crate::error::JwtError;

/// Default identity endpoint base URL.
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.yandex.ru";

/// User-info response format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInfoFormat {
    Json,
    Xml,
    Jwt,
}

impl UserInfoFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Jwt => "jwt",
        }
    }
}

/// Identity client for the user-info endpoint.
pub struct YandexId<T: HttpTransport = ReqwestHttpTransport> {
    oauth_token: String,
    base_url: String,
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl YandexId<ReqwestHttpTransport> {
    /// Create a new client with the default transport and logger.
    pub fn new(oauth_token: impl Into<String>) -> YandexIdResult<Self> {
        Ok(Self::with_components(
            oauth_token,
            DEFAULT_LOGIN_BASE_URL,
            Arc::new(ReqwestHttpTransport::new()?),
            Arc::new(TracingLogger::new()),
        ))
    }
}

impl<T: HttpTransport> YandexId<T> {
    /// Create a client with injected transport and logger.
    pub fn with_components(
        oauth_token: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<T>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            base_url: base_url.into(),
            transport,
            logger,
        }
    }

    /// Fetch the user's profile as raw text in the requested format.
    ///
    /// `with_openid_identity` and `jwt_secret` are omitted from the query
    /// when falsy, so the common request is exactly `/info?format=json`.
    /// Supplying `jwt_secret` produces a security warning; the provider
    /// recommends against sending it.
    pub async fn get_user_info(
        &self,
        format: UserInfoFormat,
        jwt_secret: Option<&str>,
        with_openid_identity: bool,
    ) -> YandexIdResult<String> {
        let context = LogContext::new().operation("get_user_info");
        if jwt_secret.is_some() {
            self.logger.warn(
                "using jwt_secret is not recommended for security reasons",
                &context,
            );
        }

        let mut url = self.info_url()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", format.as_str());
            if with_openid_identity {
                query.append_pair("with_openid_identity", "1");
            }
            if let Some(secret) = jwt_secret {
                query.append_pair("jwt_secret", secret);
            }
        }

        let request = HttpRequest::get(url.as_str())
            .header("authorization", format!("OAuth {}", self.oauth_token));
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(response.unexpected_status().into());
        }
        Ok(response.body)
    }

    /// Fetch the profile in JSON format, parsed into a [`User`] record.
    pub async fn get_user_info_json(&self, with_openid_identity: bool) -> YandexIdResult<User> {
        let body = self
            .get_user_info(UserInfoFormat::Json, None, with_openid_identity)
            .await?;
        serde_json::from_str(&body).map_err(|e| {
            ProtocolError::InvalidJson {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Fetch the profile in XML format, returned as-is and unvalidated.
    pub async fn get_user_info_xml(&self, with_openid_identity: bool) -> YandexIdResult<String> {
        self.get_user_info(UserInfoFormat::Xml, None, with_openid_identity)
            .await
    }

    /// Fetch the profile as an opaque encoded JWT, no verification.
    pub async fn get_user_info_jwt_unparsed(
        &self,
        jwt_secret: Option<&str>,
        with_openid_identity: bool,
    ) -> YandexIdResult<String> {
        self.get_user_info(UserInfoFormat::Jwt, jwt_secret, with_openid_identity)
            .await
    }

    /// Fetch and decode the profile JWT with symmetric HMAC-SHA256
    /// verification.
    ///
    /// One of `client_secret` or `jwt_secret` is required as the key;
    /// `client_secret` wins when both are present.
    #[cfg(feature = "jwt")]
    pub async fn get_user_info_jwt(
        &self,
        client_secret: Option<&str>,
        jwt_secret: Option<&str>,
        with_openid_identity: bool,
    ) -> YandexIdResult<serde_json::Value> {
        let secret = client_secret
            .filter(|s| !s.is_empty())
            .or_else(|| jwt_secret.filter(|s| !s.is_empty()))
            .ok_or(JwtError::MissingSecret)?
            .to_string();

        let encoded = self
            .get_user_info_jwt_unparsed(jwt_secret, with_openid_identity)
            .await?;
        decode_claims(&encoded, &secret).map_err(Into::into)
    }

    /// Format a user's avatar URL.
    pub fn avatar_url(&self, avatar_id: &str, size: &str) -> String {
        avatar::avatar_url(avatar_id, size)
    }

    fn info_url(&self) -> YandexIdResult<Url> {
        let raw = format!("{}/info", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|_| ConfigurationError::InvalidEndpoint { url: raw }.into())
    }
}

/// Decode a JWT with HMAC-SHA256 and a shared secret. The provider
/// payload carries no mandatory expiry claim, so none is required.
#[cfg(feature = "jwt")]
fn decode_claims(token: &str, secret: &str) -> Result<serde_json::Value, JwtError> {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| JwtError::DecodeFailed {
        message: e.to_string(),
    })
}
