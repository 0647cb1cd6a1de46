//! OAuth Client
//!
//! Authorization-code and refresh-token flows against the Yandex OAuth
//! endpoints: authorization URL assembly, code exchange, token refresh and
//! token revocation.
//!
//! All three network operations share one response policy: the body is
//! parsed before the HTTP status is interpreted. A body carrying `error`
//! is conclusive and maps through the per-operation error taxonomy; a body
//! without `error` on a 2xx is conclusive success; anything else surfaces
//! as a transport-level failure.

use std::sync::Arc;

use base64::Engine;
use secrecy::ExposeSecret;
use url::Url;

use crate::core::{
    ignored_optional_scopes, validate_device_id, validate_device_name, HttpRequest,
    HttpTransport, ReqwestHttpTransport,
};
use crate::error::{
    map_exchange_error, map_refresh_error, map_revoke_error, ConfigurationError,
    ProtocolError, ProviderError, ProviderErrorResponse, YandexIdResult,
};
use crate::telemetry::{LogContext, Logger, TracingLogger};
use crate::types::{AuthorizationParams, OAuthConfig, Token};

/// OAuth client for the authorization-code and refresh-token flows.
///
/// Holds only immutable configuration and shared handles; operations are
/// independent single-shot calls and may be issued concurrently.
pub struct YandexOAuth<T: HttpTransport = ReqwestHttpTransport> {
    config: OAuthConfig,
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl YandexOAuth<ReqwestHttpTransport> {
    /// Create a new client with the default transport and logger.
    pub fn new(config: OAuthConfig) -> YandexIdResult<Self> {
        let transport = Arc::new(ReqwestHttpTransport::with_timeout(config.timeout)?);
        Ok(Self::with_components(
            config,
            transport,
            Arc::new(TracingLogger::new()),
        ))
    }
}

impl<T: HttpTransport> YandexOAuth<T> {
    /// Create a client with injected transport and logger.
    pub fn with_components(
        config: OAuthConfig,
        transport: Arc<T>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config,
            transport,
            logger,
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Build the authorization URL the user is redirected to.
    ///
    /// Pure; no network call is made. An invalid `device_id` or
    /// `device_name` aborts before any URL is assembled. A half-specified
    /// device pair is included but produces a warning through the logger.
    pub fn authorization_url(&self, params: &AuthorizationParams) -> YandexIdResult<String> {
        let context = self.context("authorization_url");
        let device_pairs = self.device_pairs(
            &context,
            params.device_id.as_deref(),
            params.device_name.as_deref(),
        )?;

        let mut url = self.endpoint_url("/authorize")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", params.response_type.as_str());
            query.append_pair("redirect_uri", &self.config.credentials.redirect_uri);
            query.append_pair("client_id", &self.config.credentials.client_id);
            for (key, value) in &device_pairs {
                query.append_pair(key, value);
            }
            if let Some(login_hint) = &params.login_hint {
                query.append_pair("login_hint", login_hint);
            }
            if let Some(scope) = &params.scope {
                query.append_pair("scope", scope);
            }
            if let Some(optional_scope) = &params.optional_scope {
                self.check_optional_scope(&context, params.scope.as_deref(), optional_scope);
                query.append_pair("optional_scope", optional_scope);
            }
            if params.force_confirm {
                query.append_pair("force_confirm", "1");
            }
            if let Some(state) = &params.state {
                query.append_pair("state", state);
            }
        }
        Ok(url.to_string())
    }

    /// Exchange an authorization code for a token pair.
    pub async fn exchange_code(
        &self,
        code: &str,
        device_id: Option<&str>,
        device_name: Option<&str>,
    ) -> YandexIdResult<Token> {
        let context = self.context("exchange_code");
        let mut form = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code.to_string()),
        ];
        form.extend(self.device_pairs(&context, device_id, device_name)?);

        let value = self
            .token_endpoint_request(&context, "/token", form, map_exchange_error)
            .await?;
        self.parse_token(value)
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> YandexIdResult<Token> {
        let context = self.context("refresh_token");
        let form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
        ];

        let value = self
            .token_endpoint_request(&context, "/token", form, map_refresh_error)
            .await?;
        self.parse_token(value)
    }

    /// Revoke an access token together with its refresh token.
    ///
    /// Success is `Ok(())` only; an `error` body maps through the
    /// revocation code set and there is no other outcome.
    pub async fn revoke_token(&self, access_token: &str) -> YandexIdResult<()> {
        let context = self.context("revoke_token");
        let form = vec![("access_token", access_token.to_string())];

        self.token_endpoint_request(&context, "/revoke_token", form, map_revoke_error)
            .await?;
        self.logger.debug("token revoked", &context);
        Ok(())
    }

    fn context(&self, operation: &str) -> LogContext {
        LogContext::new()
            .operation(operation)
            .client_id(self.config.credentials.client_id.as_str())
    }

    fn endpoint_url(&self, path: &str) -> YandexIdResult<Url> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|_| {
            ConfigurationError::InvalidEndpoint { url: raw }.into()
        })
    }

    fn basic_auth(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.config.credentials.client_id,
            self.config.credentials.client_secret.expose_secret()
        );
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    /// Validate and collect the device pair, warning on a half-specified
    /// one. Validation failures abort before any request is made.
    fn device_pairs(
        &self,
        context: &LogContext,
        device_id: Option<&str>,
        device_name: Option<&str>,
    ) -> YandexIdResult<Vec<(&'static str, String)>> {
        let mut pairs = Vec::new();
        if let Some(id) = device_id {
            if let Err(e) = validate_device_id(id) {
                self.logger.error(&e.to_string(), context);
                return Err(e.into());
            }
            pairs.push(("device_id", id.to_string()));
            if device_name.is_none() {
                self.logger.warn(
                    "device_id is specified, but device_name is not; \
                     the token will be issued for an unknown device",
                    context,
                );
            }
        }
        if let Some(name) = device_name {
            if let Err(e) = validate_device_name(name) {
                self.logger.error(&e.to_string(), context);
                return Err(e.into());
            }
            pairs.push(("device_name", name.to_string()));
            if device_id.is_none() {
                self.logger.warn(
                    "device_name is specified, but device_id is not; \
                     device_name will be ignored",
                    context,
                );
            }
        }
        Ok(pairs)
    }

    /// Warn about optional scopes outside the granted scope. The explicit
    /// `scope` argument wins over the client default; with neither set the
    /// check is skipped. Warnings never prevent `optional_scope` from
    /// being sent.
    fn check_optional_scope(
        &self,
        context: &LogContext,
        scope: Option<&str>,
        optional_scope: &str,
    ) {
        let granted = scope
            .filter(|s| !s.is_empty())
            .or(self.config.credentials.default_scope.as_deref())
            .filter(|s| !s.is_empty());
        let Some(granted) = granted else {
            return;
        };

        let ignored = ignored_optional_scopes(granted, optional_scope);
        if !ignored.is_empty() {
            self.logger.warn(
                &format!(
                    "optional scopes {} are not in the granted scope and will be ignored",
                    ignored.join(", ")
                ),
                context,
            );
        }
    }

    /// POST a form to a token-lifecycle endpoint and apply the shared
    /// response policy, mapping provider error bodies with `map_error`.
    async fn token_endpoint_request(
        &self,
        context: &LogContext,
        path: &str,
        form: Vec<(&'static str, String)>,
        map_error: fn(&ProviderErrorResponse) -> ProviderError,
    ) -> YandexIdResult<serde_json::Value> {
        let url = self.endpoint_url(path)?;
        let request = HttpRequest::post_form(url.as_str(), encode_form(&form))
            .header("authorization", self.basic_auth())
            .timeout(self.config.timeout);

        let response = self.transport.send(request).await?;

        let value: serde_json::Value = match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(e) if response.is_success() => {
                return Err(ProtocolError::InvalidJson {
                    message: e.to_string(),
                }
                .into());
            }
            Err(_) => return Err(response.unexpected_status().into()),
        };

        if value.get("error").is_some() {
            let parsed: ProviderErrorResponse =
                serde_json::from_value(value).map_err(|e| ProtocolError::InvalidJson {
                    message: e.to_string(),
                })?;
            let mapped = map_error(&parsed);
            self.logger.error(&mapped.to_string(), context);
            return Err(mapped.into());
        }

        if !response.is_success() {
            return Err(response.unexpected_status().into());
        }

        Ok(value)
    }

    fn parse_token(&self, value: serde_json::Value) -> YandexIdResult<Token> {
        serde_json::from_value(value).map_err(|e| {
            ProtocolError::InvalidJson {
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn encode_form(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockHttpTransport;
    use crate::error::YandexIdError;
    use crate::telemetry::InMemoryLogger;
    use crate::types::{ClientCredentials, ResponseType};

    fn test_config() -> OAuthConfig {
        OAuthConfig::new(
            ClientCredentials::new("test-client", "test-secret", "https://myapp.example/cb")
                .with_default_scope("login:info login:email"),
        )
    }

    fn test_client() -> (
        YandexOAuth<MockHttpTransport>,
        Arc<MockHttpTransport>,
        Arc<InMemoryLogger>,
    ) {
        let transport = Arc::new(MockHttpTransport::new());
        let logger = Arc::new(InMemoryLogger::new());
        let client =
            YandexOAuth::with_components(test_config(), transport.clone(), logger.clone());
        (client, transport, logger)
    }

    fn token_body() -> serde_json::Value {
        serde_json::json!({
            "access_token": "A",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "R"
        })
    }

    #[test]
    fn test_authorization_url_minimal() {
        let (client, _, logger) = test_client();
        let url = client
            .authorization_url(&AuthorizationParams::default())
            .unwrap();

        assert!(url.starts_with("https://oauth.yandex.ru/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fmyapp.example%2Fcb"));
        assert!(!url.contains("device_id"));
        assert!(!url.contains("force_confirm"));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_authorization_url_implicit_flow() {
        let (client, _, _) = test_client();
        let params = AuthorizationParams {
            response_type: ResponseType::Token,
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();
        assert!(url.contains("response_type=token"));
    }

    #[test]
    fn test_authorization_url_device_id_without_name_warns() {
        let (client, _, logger) = test_client();
        let params = AuthorizationParams {
            device_id: Some("abc123".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();

        assert!(url.contains("device_id=abc123"));
        assert!(!url.contains("device_name"));
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unknown device"));
    }

    #[test]
    fn test_authorization_url_device_name_without_id_warns() {
        let (client, _, logger) = test_client();
        let params = AuthorizationParams {
            device_name: Some("Living room TV".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();

        assert!(url.contains("device_name=Living+room+TV"));
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("device_name will be ignored"));
    }

    #[test]
    fn test_authorization_url_both_device_fields_no_warning() {
        let (client, _, logger) = test_client();
        let params = AuthorizationParams {
            device_id: Some("abc123".to_string()),
            device_name: Some("TV".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();
        assert!(url.contains("device_id=abc123"));
        assert!(url.contains("device_name=TV"));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_authorization_url_invalid_device_id_aborts() {
        let (client, _, _) = test_client();
        let params = AuthorizationParams {
            device_id: Some("abc-123".to_string()),
            ..Default::default()
        };
        let result = client.authorization_url(&params);
        assert!(matches!(result, Err(YandexIdError::Validation(_))));
    }

    #[test]
    fn test_authorization_url_invalid_device_name_aborts() {
        let (client, _, _) = test_client();
        let params = AuthorizationParams {
            device_name: Some("x".repeat(101)),
            ..Default::default()
        };
        let result = client.authorization_url(&params);
        assert!(matches!(result, Err(YandexIdError::Validation(_))));
    }

    #[test]
    fn test_authorization_url_optional_scope_warns_but_is_sent() {
        let (client, _, logger) = test_client();
        let params = AuthorizationParams {
            optional_scope: Some("login:info,login:avatar".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();

        assert!(url.contains("optional_scope=login%3Ainfo%2Clogin%3Aavatar"));
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("login:avatar"));
        assert!(!warnings[0].contains("login:info,"));
    }

    #[test]
    fn test_authorization_url_explicit_scope_wins_over_default() {
        let (client, _, logger) = test_client();
        let params = AuthorizationParams {
            scope: Some("login:avatar".to_string()),
            optional_scope: Some("login:avatar".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();

        // Covered by the explicit scope even though the client default
        // does not contain it.
        assert!(url.contains("scope=login%3Aavatar"));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_authorization_url_force_confirm_and_state() {
        let (client, _, _) = test_client();
        let params = AuthorizationParams {
            force_confirm: true,
            state: Some("xyzzy".to_string()),
            login_hint: Some("ivan".to_string()),
            ..Default::default()
        };
        let url = client.authorization_url(&params).unwrap();
        assert!(url.contains("force_confirm=1"));
        assert!(url.contains("state=xyzzy"));
        assert!(url.contains("login_hint=ivan"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(200, &token_body());

        let token = client.exchange_code("1234567", None, None).await.unwrap();
        assert_eq!(token.access_token, "A");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.refresh_token, "R");
        assert_eq!(token.scope, None);

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://oauth.yandex.ru/token");
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=authorization_code&code=1234567")
        );
        // base64("test-client:test-secret")
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=")
        );
        assert!(request.headers.contains_key("user-agent"));
    }

    #[tokio::test]
    async fn test_exchange_code_with_device_pair() {
        let (client, transport, logger) = test_client();
        transport.queue_json_response(200, &token_body());

        client
            .exchange_code("1234567", Some("abc123"), Some("TV"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=authorization_code&code=1234567&device_id=abc123&device_name=TV")
        );
        assert!(logger.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_exchange_code_invalid_device_id_skips_network() {
        let (client, transport, _) = test_client();

        let result = client.exchange_code("1234567", Some("ab"), None).await;
        assert!(matches!(result, Err(YandexIdError::Validation(_))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_exchange_code_provider_error_on_400() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(
            400,
            &serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Code has expired"
            }),
        );

        let result = client.exchange_code("1234567", None, None).await;
        match result {
            Err(YandexIdError::Provider(ProviderError::InvalidGrant { description })) => {
                assert_eq!(description, "Code has expired");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_body_is_conclusive_even_on_200() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(
            200,
            &serde_json::json!({
                "error": "authorization_pending",
                "error_description": "User has not yet authorized your app"
            }),
        );

        let result = client.exchange_code("1234567", None, None).await;
        assert!(matches!(
            result,
            Err(YandexIdError::Provider(ProviderError::AuthorizationPending { .. }))
        ));
    }

    #[tokio::test]
    async fn test_refresh_token_success() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(200, &token_body());

        let token = client.refresh_token("R-old").await.unwrap();
        assert_eq!(token.refresh_token, "R");

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=refresh_token&refresh_token=R-old")
        );
    }

    #[tokio::test]
    async fn test_refresh_token_invalid_scope_is_generic() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(
            400,
            &serde_json::json!({
                "error": "invalid_scope",
                "error_description": "nope"
            }),
        );

        let result = client.refresh_token("R").await;
        assert!(matches!(
            result,
            Err(YandexIdError::Provider(ProviderError::Generic { .. }))
        ));
    }

    #[tokio::test]
    async fn test_revoke_token_success() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(200, &serde_json::json!({"status": "ok"}));

        client.revoke_token("A").await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://oauth.yandex.ru/revoke_token");
        assert_eq!(request.body.as_deref(), Some("access_token=A"));
    }

    #[tokio::test]
    async fn test_revoke_token_error_raises_never_false() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(
            400,
            &serde_json::json!({
                "error": "invalid_request",
                "error_description": "bad token"
            }),
        );

        let result = client.revoke_token("A").await;
        match result {
            Err(YandexIdError::Provider(ProviderError::InvalidRequest { description })) => {
                assert_eq!(description, "bad token");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_revoke_token_invalid_grant_is_generic() {
        let (client, transport, _) = test_client();
        transport.queue_json_response(
            400,
            &serde_json::json!({
                "error": "invalid_grant",
                "error_description": "expired"
            }),
        );

        let result = client.revoke_token("A").await;
        match result {
            Err(YandexIdError::Provider(ProviderError::Generic { code, description })) => {
                assert_eq!(code, "invalid_grant");
                assert_eq!(description, "expired");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_page_is_transport_failure() {
        let (client, transport, _) = test_client();
        transport.queue_response(crate::core::HttpResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        });

        let result = client.exchange_code("1234567", None, None).await;
        assert!(matches!(
            result,
            Err(YandexIdError::Protocol(ProtocolError::UnexpectedStatus { status: 502, .. }))
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_protocol_error() {
        let (client, transport, _) = test_client();
        transport.queue_response(crate::core::HttpResponse {
            status: 200,
            body: "not json".to_string(),
        });

        let result = client.refresh_token("R").await;
        assert!(matches!(
            result,
            Err(YandexIdError::Protocol(ProtocolError::InvalidJson { .. }))
        ));
    }

    #[test]
    fn test_encode_form_escapes_values() {
        let encoded = encode_form(&[("code", "a b&c".to_string())]);
        assert_eq!(encoded, "code=a%20b%26c");
    }
}
