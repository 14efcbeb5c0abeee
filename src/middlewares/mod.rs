//! Request pipeline middleware.

pub mod auth_middleware;
pub mod auth_inner;

pub use auth_middleware::AuthMiddleware;
