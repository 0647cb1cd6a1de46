//! HTTP Transport
//!
//! HTTP client interface and implementations for provider requests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{ConfigurationError, NetworkError, ProtocolError, YandexIdError};

/// User agent sent with every outgoing request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP request definition.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL, query string included.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Form-encoded request body.
    pub body: Option<String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: default_headers(),
            body: None,
            timeout: None,
        }
    }

    /// Create a form-encoded POST request.
    pub fn post_form(url: impl Into<String>, body: String) -> Self {
        let mut request = Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: default_headers(),
            body: Some(body),
            timeout: None,
        };
        request.headers.insert(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        request
    }

    /// Set a request header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn default_headers() -> HashMap<String, String> {
    [("user-agent".to_string(), USER_AGENT.to_string())]
        .into_iter()
        .collect()
}

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// HTTP response definition.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error for a response whose status is conclusive on its own.
    pub fn unexpected_status(&self) -> ProtocolError {
        ProtocolError::UnexpectedStatus {
            status: self.status,
            body: self.body.clone(),
        }
    }
}

/// HTTP transport interface (for dependency injection).
///
/// Implementations must be safe for concurrent reuse across calls;
/// connection pooling is the transport's responsibility.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, YandexIdError>;
}

/// Default reqwest-based HTTP transport.
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl ReqwestHttpTransport {
    /// Create new transport with default settings.
    pub fn new() -> Result<Self, YandexIdError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create transport with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, YandexIdError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // OAuth endpoints must never be followed through redirects.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConfigurationError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, YandexIdError> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder.timeout(timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                YandexIdError::Network(NetworkError::Timeout { timeout })
            } else {
                YandexIdError::Network(NetworkError::ConnectionFailed {
                    message: e.to_string(),
                })
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            YandexIdError::Network(NetworkError::ConnectionFailed {
                message: e.to_string(),
            })
        })?;

        Ok(HttpResponse { status, body })
    }
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockHttpTransport {
    responses: std::sync::Mutex<Vec<HttpResponse>>,
    request_history: std::sync::Mutex<Vec<HttpRequest>>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: HttpResponse) -> &Self {
        self.responses.lock().unwrap().insert(0, response);
        self
    }

    /// Queue a JSON response.
    pub fn queue_json_response<T: serde::Serialize>(&self, status: u16, body: &T) -> &Self {
        self.queue_response(HttpResponse {
            status,
            body: serde_json::to_string(body).unwrap(),
        })
    }

    /// Get request history.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.request_history.lock().unwrap().clone()
    }

    /// Get last request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.request_history.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, YandexIdError> {
        self.request_history.lock().unwrap().push(request);

        self.responses.lock().unwrap().pop().ok_or_else(|| {
            YandexIdError::Network(NetworkError::ConnectionFailed {
                message: "No mock response queued".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_replays_in_queue_order() {
        let transport = MockHttpTransport::new();
        transport.queue_json_response(200, &serde_json::json!({"first": true}));
        transport.queue_json_response(400, &serde_json::json!({"first": false}));

        let first = transport.send(HttpRequest::get("https://example.com/a")).await.unwrap();
        assert_eq!(first.status, 200);
        assert!(first.body.contains("true"));

        let second = transport.send(HttpRequest::get("https://example.com/b")).await.unwrap();
        assert_eq!(second.status, 400);

        let history = transport.requests();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_mock_transport_fails_when_empty() {
        let transport = MockHttpTransport::new();
        let result = transport.send(HttpRequest::get("https://example.com")).await;
        assert!(matches!(
            result,
            Err(YandexIdError::Network(NetworkError::ConnectionFailed { .. }))
        ));
    }

    #[test]
    fn test_post_form_sets_content_type_and_user_agent() {
        let request = HttpRequest::post_form("https://example.com/token", "a=b".to_string());
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.headers.get("user-agent").map(String::as_str),
            Some(USER_AGENT)
        );
        assert_eq!(request.body.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_unexpected_status() {
        let response = HttpResponse {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(!response.is_success());
        let err = response.unexpected_status();
        assert!(matches!(err, ProtocolError::UnexpectedStatus { status: 502, .. }));
    }
}
