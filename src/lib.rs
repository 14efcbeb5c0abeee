//! Fitness platform backend
//!
//! REST service for a fitness application: account management with role and
//! permission based access control, member profiles, fitness progress
//! tracking and workout partner matching.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API endpoints
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← request/response handling
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← business logic
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← data access
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← storage
//! └─────────────────┘
//! ```
//!
//! Services and repositories are singletons wired through the macro based
//! dependency injection in [`core::registry`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use fitness_service_backend::services::users::user_service::UserService;
//! use fitness_service_backend::services::auth::TokenService;
//!
//! let user_service = UserService::instance();
//! let token_service = TokenService::instance();
//!
//! let user = user_service.register(request).await?;
//! let tokens = token_service.generate_token_pair(&user)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
