//! User account persistence.

pub mod user_repo;

pub use user_repo::UserRepository;
