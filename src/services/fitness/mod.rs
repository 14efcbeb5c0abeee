//! Fitness domain business logic.

pub mod profile_service;
pub mod progress_service;
pub mod preference_service;

pub use profile_service::ProfileService;
pub use progress_service::ProgressService;
pub use preference_service::PreferenceService;
