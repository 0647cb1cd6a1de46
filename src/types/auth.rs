//! Authorization Types
//!
//! Parameters for authorization URL generation.

/// Response type requested from the authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Authorization code flow.
    #[default]
    Code,
    /// Implicit flow; the token is returned in the redirect fragment.
    Token,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

/// Parameters for authorization URL generation.
///
/// Built per call and discarded; nothing here is persisted.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationParams {
    /// Response type.
    pub response_type: ResponseType,
    /// Device id (6 to 50 alphanumeric characters).
    pub device_id: Option<String>,
    /// Device name shown to the user (up to 100 characters).
    pub device_name: Option<String>,
    /// Login hint for pre-filling user identity.
    pub login_hint: Option<String>,
    /// Requested scope (overrides the client default for optional-scope
    /// validation).
    pub scope: Option<String>,
    /// Comma-separated optional scopes the user may decline.
    pub optional_scope: Option<String>,
    /// Force the consent screen even for an already-authorized client.
    pub force_confirm: bool,
    /// Opaque state passed back on the redirect.
    pub state: Option<String>,
}
