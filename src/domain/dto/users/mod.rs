//! # User Data Transfer Objects Module
//!
//! Request and response contracts of the auth and user management
//! APIs.
//!
//! ## Request DTOs
//!
//! - `RegisterRequest` - self-service member signup
//! - `LoginRequest` - credential login
//! - `RefreshTokenRequest` - token renewal
//! - `CreateUserRequest` - admin-driven account creation
//! - `UpdateUserRequest` - partial account updates
//!
//! ## Response DTOs
//!
//! - `UserResponse` - user data without the password hash
//! - `CreateUserResponse` - created user plus a confirmation message
//! - `LoginResponse` - user plus a Bearer token set
//!
//! ## JSON shape of a login response
//!
//! ```json
//! {
//!   "user": {
//!     "id": "507f1f77bcf86cd799439011",
//!     "email": "user@example.com",
//!     "first_name": "John",
//!     "last_name": "Doe",
//!     "role": "user",
//!     "permissions": [],
//!     "is_active": true
//!   },
//!   "access_token": "eyJhbGciOiJIUzI1NiIs...",
//!   "token_type": "Bearer",
//!   "expires_in": 86400,
//!   "refresh_token": "eyJhbGciOiJIUzI1NiIs..."
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
