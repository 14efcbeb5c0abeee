//! Caching layer.
//!
//! Redis-backed distributed cache with JSON object serialization.
//!
//! # Features
//!
//! - Redis integration over a multiplexed connection
//! - Automatic JSON serialization/deserialization
//! - TTL support and pattern-based invalidation
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set("user:123", &user_data).await?;
//! cache.set_with_expiry("session:abc", &session, 3600).await?;
//!
//! let cached_user: Option<User> = cache.get("user:123").await?;
//! ```
//!
//! # Configuration
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # default
//! ```

pub mod redis;
