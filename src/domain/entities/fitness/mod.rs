//! Fitness Entity Module
//!
//! Entities of the fitness domain, one per collection:
//!
//! - [`profile`] - member profile (`profiles`)
//! - [`progress`] - measurement and metric history (`fitness_progress`)
//! - [`preference`] - workout preferences (`workout_preferences`)
//!
//! Each document references its owner through a unique `user_id`.

pub mod profile;
pub mod progress;
pub mod preference;
