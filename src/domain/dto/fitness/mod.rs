//! Fitness Data Transfer Objects Module
//!
//! Request/response contracts of the fitness vertical:
//!
//! - [`profile`] - profile CRUD, nearby/search queries, stats
//! - [`progress`] - measurement recording, history, progress queries
//! - [`preference`] - preference CRUD, partner matching, stats
//!
//! Entities of this vertical serialize cleanly, so read endpoints
//! return them directly; dedicated response DTOs exist only where
//! the payload is computed (stats, matches, recommendations).

pub mod profile;
pub mod progress;
pub mod preference;

pub use profile::*;
pub use progress::*;
pub use preference::*;
