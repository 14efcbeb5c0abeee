//! Fitness data persistence: profiles, progress series, preferences.

pub mod profile_repo;
pub mod progress_repo;
pub mod preference_repo;

pub use profile_repo::ProfileRepository;
pub use progress_repo::ProgressRepository;
pub use preference_repo::PreferenceRepository;
