//! Core Infrastructure
//!
//! HTTP transport abstraction and request validators.

pub mod transport;
pub mod validators;

pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport, USER_AGENT,
};
pub use validators::{ignored_optional_scopes, validate_device_id, validate_device_name};
