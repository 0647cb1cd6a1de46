//! Token Types
//!
//! Token response from the OAuth endpoint.

use serde::Deserialize;

/// Token pair returned by a successful exchange or refresh.
///
/// Only ever constructed from a response body without an `error` field;
/// callers own persistence.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// OAuth access token.
    pub access_token: String,
    /// Token type, always `bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Refresh token.
    pub refresh_token: String,
    /// Granted scope; present only if some requested scope was declined.
    #[serde(default)]
    pub scope: Option<String>,
}

impl Token {
    /// Format the access token as an `Authorization` header value for the
    /// user-info endpoint.
    pub fn authorization_header(&self) -> String {
        format!("OAuth {}", self.access_token)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}
