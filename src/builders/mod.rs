//! Builders
//!
//! Fluent configuration builders.

pub mod config;

pub use config::{oauth_config, OAuthConfigBuilder};
