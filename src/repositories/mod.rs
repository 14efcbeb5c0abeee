//! Data access layer.
//!
//! Repositories are singletons managed through the `#[repository]`
//! macro, backed by MongoDB with Redis caching on hot lookups.
//!
//! # Features
//!
//! - Singleton instances with automatic dependency injection
//! - Multi-layer reads: Redis first, MongoDB on miss
//! - Index creation at initialization time
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod fitness;
