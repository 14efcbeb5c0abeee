//! # Data Transfer Objects (DTO) Module
//!
//! Request/response contracts of the HTTP API.
//!
//! ## Design principles
//!
//! ### 1. API contract first
//! - Explicit structures for everything clients send or receive
//! - Backwards-compatible evolution: new fields are optional
//!
//! ### 2. Built-in validation
//! - Compile-time shape checks through `serde`
//! - Runtime business rules through the `validator` crate
//! - Validation failures surface as HTTP 400 with a descriptive message
//!
//! ### 3. Domain separation
//! - Entities and DTOs are distinct types
//! - Sensitive fields (password hashes) never appear in responses
//!
//! ## Module layout
//!
//! ```text
//! dto/
//! ├── users/        # registration, login, admin user management
//! └── fitness/      # profiles, fitness progress, workout preferences
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! pub async fn register(
//!     payload: web::Json<RegisterRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload
//!         .validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!
//!     let user = UserService::instance().register(payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(UserResponse::from(user)))
//! }
//! ```

pub mod users;
pub mod fitness;

pub use users::*;
pub use fitness::*;
