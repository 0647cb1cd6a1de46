//! Data Types
//!
//! Configuration, authorization, token and user-info types.

pub mod auth;
pub mod config;
pub mod token;
pub mod user;

pub use auth::{AuthorizationParams, ResponseType};
pub use config::{ClientCredentials, OAuthConfig, DEFAULT_OAUTH_BASE_URL, DEFAULT_TIMEOUT};
pub use token::Token;
pub use user::{Phone, Sex, User};
