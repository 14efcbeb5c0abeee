//! HTTP request handlers.
//!
//! Thin actix handlers: validate the payload, resolve the singleton
//! service, translate the result into a response. Authorization is a
//! scope-level `AuthMiddleware` plus per-route permission checks on
//! the extracted [`AuthenticatedUser`].
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::authenticated_user::AuthenticatedUser

pub mod auth;
pub mod users;
pub mod profiles;
pub mod progress;
pub mod preferences;
