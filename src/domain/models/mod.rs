//! # Domain Models Module
//!
//! Business models and value objects, as opposed to persistent
//! entities.
//!
//! ## Entities vs Models
//!
//! ### Entities (`../entities/`)
//! - **Persistence**: stored directly in MongoDB
//! - **Identity**: carry a unique `_id`
//! - **Lifecycle**: created, updated, deleted
//!
//! ### Models (this module)
//! - **Runtime only**: never persisted as documents
//! - **Value semantics**: the value matters, not an identifier
//! - **Immutability**: generally treated as immutable
//!
//! ## Modules
//!
//! - [`auth`] - authenticated-user extractor and guard requirements
//! - [`token`] - JWT claims and the token pair handed to clients

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
