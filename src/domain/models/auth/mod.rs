//! Authentication runtime models.
//!
//! - [`authenticated_user`] - request extractors for the verified caller
//! - [`authentication_request`] - guard requirements used by the middleware

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::*;
pub use authentication_request::*;
