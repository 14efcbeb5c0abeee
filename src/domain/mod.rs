//! # Domain Layer Module
//!
//! Core domain module holding business objects and domain rules,
//! designed along Domain-Driven Design lines.
//!
//! ## Architecture
//!
//! ```text
//! Domain Layer (this module)
//! ├── Entities      - persistent business objects
//! ├── DTOs          - request/response transfer objects
//! └── Models        - auth and token runtime models
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## Modules
//!
//! ### [`entities`] - persistent domain entities
//!
//! Objects stored in MongoDB, one struct per collection document.
//! Identified by `ObjectId` and serialized with `serde`/`bson`.
//!
//! ### [`dto`] - data transfer objects
//!
//! API boundary contracts. Request DTOs carry `validator` rules;
//! response DTOs strip sensitive fields such as password hashes.
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use validator::Validate;
//!
//! #[derive(Debug, Deserialize, Validate)]
//! pub struct RegisterRequest {
//!     #[validate(email(message = "Invalid email address"))]
//!     pub email: String,
//!
//!     #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
//!     pub password: String,
//! }
//! ```
//!
//! ### [`models`] - runtime models
//!
//! Non-persistent structures used for authentication: JWT claims,
//! token pairs and the authenticated-user extractor.
//!
//! ## Usage: registration flow
//!
//! ```rust,ignore
//! use crate::domain::{entities::users::User, dto::users::RegisterRequest};
//!
//! // 1. Validate the incoming DTO
//! request.validate()?;
//!
//! // 2. Build the domain entity
//! let user = User::new(request.first_name, request.last_name,
//!                      request.email, password_hash, UserRole::User);
//!
//! // 3. Persist through the repository
//! let saved = user_repository.create(user).await?;
//!
//! // 4. Convert to the response DTO
//! let response = UserResponse::from(saved);
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
