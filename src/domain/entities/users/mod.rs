//! Users Entity Module
//!
//! Core entities of the user domain: the `User` document plus the
//! role and permission enums that drive access control.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, UserRole};
//!
//! let user = User::new(
//!     "Jane".to_string(),
//!     "Doe".to_string(),
//!     "jane@example.com".to_string(),
//!     password_hash,
//!     UserRole::Trainer,
//! );
//! assert!(user.permissions.contains(&UserPermission::ManageWorkouts));
//! ```

pub mod user;
