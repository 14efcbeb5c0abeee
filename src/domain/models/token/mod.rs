//! JWT token models.

pub mod token;

pub use token::*;
