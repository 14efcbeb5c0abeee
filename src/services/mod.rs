//! Business logic layer.
//!
//! Services are singletons created through the `#[service]` macro with
//! their repositories injected automatically. Handlers never touch a
//! repository directly.

pub mod auth;
pub mod users;
pub mod fitness;
