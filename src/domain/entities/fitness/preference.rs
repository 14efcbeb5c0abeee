//! Workout Preference Entity Implementation
//!
//! One `workout_preferences` document per user, describing what,
//! when and how intensely they like to train. Drives the partner
//! matching and recommendation features.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Workout disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Hiit,
    Yoga,
    Pilates,
    Crossfit,
    Swimming,
    Cycling,
    Running,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Cardio => "CARDIO",
            WorkoutType::Strength => "STRENGTH",
            WorkoutType::Flexibility => "FLEXIBILITY",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Yoga => "YOGA",
            WorkoutType::Pilates => "PILATES",
            WorkoutType::Crossfit => "CROSSFIT",
            WorkoutType::Swimming => "SWIMMING",
            WorkoutType::Cycling => "CYCLING",
            WorkoutType::Running => "RUNNING",
        }
    }
}

/// Equipment a member has access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Equipment {
    Dumbbells,
    Barbells,
    Treadmill,
    Elliptical,
    ResistanceBands,
    Kettlebells,
    YogaMat,
    FoamRoller,
    PullUpBar,
    Bench,
}

/// Scheduling preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePreference {
    pub preferred_days: Vec<String>,
    pub preferred_time_slot: String,
    /// Session length in minutes
    pub preferred_duration: i32,
}

/// Intensity on a 1-10 scale per discipline family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityPreference {
    pub cardio_intensity: i32,
    pub strength_intensity: i32,
    pub flexibility_intensity: i32,
}

/// Workout preference entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPreference {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user (unique)
    pub user_id: ObjectId,
    pub preferred_workout_types: Vec<WorkoutType>,
    pub available_equipment: Vec<Equipment>,
    pub time_preference: TimePreference,
    pub intensity_preference: IntensityPreference,
    /// Target sessions per week (1-7)
    pub workouts_per_week: i32,
    pub needs_modification: bool,
    #[serde(default)]
    pub injury_considerations: Vec<String>,
    #[serde(default)]
    pub excluded_exercises: Vec<String>,
    pub prefer_group_workouts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_type_serialization() {
        assert_eq!(serde_json::to_string(&WorkoutType::Hiit).unwrap(), "\"HIIT\"");
        assert_eq!(serde_json::to_string(&WorkoutType::Strength).unwrap(), "\"STRENGTH\"");

        let parsed: WorkoutType = serde_json::from_str("\"CROSSFIT\"").unwrap();
        assert_eq!(parsed, WorkoutType::Crossfit);
    }

    #[test]
    fn test_equipment_serialization() {
        assert_eq!(
            serde_json::to_string(&Equipment::ResistanceBands).unwrap(),
            "\"RESISTANCE_BANDS\""
        );
        let parsed: Equipment = serde_json::from_str("\"PULL_UP_BAR\"").unwrap();
        assert_eq!(parsed, Equipment::PullUpBar);
    }
}
