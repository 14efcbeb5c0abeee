//! Workout preference request/response DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::fitness::preference::{
    Equipment, IntensityPreference, TimePreference, WorkoutType,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimePreferenceDto {
    #[validate(length(min = 1, message = "At least one preferred day is required"))]
    pub preferred_days: Vec<String>,

    #[validate(length(min = 1, message = "Preferred time slot is required"))]
    pub preferred_time_slot: String,

    /// Session length in minutes
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub preferred_duration: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IntensityPreferenceDto {
    #[validate(range(min = 1, max = 10, message = "Intensity must be 1-10"))]
    pub cardio_intensity: i32,

    #[validate(range(min = 1, max = 10, message = "Intensity must be 1-10"))]
    pub strength_intensity: i32,

    #[validate(range(min = 1, max = 10, message = "Intensity must be 1-10"))]
    pub flexibility_intensity: i32,
}

impl From<TimePreferenceDto> for TimePreference {
    fn from(dto: TimePreferenceDto) -> Self {
        TimePreference {
            preferred_days: dto.preferred_days,
            preferred_time_slot: dto.preferred_time_slot,
            preferred_duration: dto.preferred_duration,
        }
    }
}

impl From<IntensityPreferenceDto> for IntensityPreference {
    fn from(dto: IntensityPreferenceDto) -> Self {
        IntensityPreference {
            cardio_intensity: dto.cardio_intensity,
            strength_intensity: dto.strength_intensity,
            flexibility_intensity: dto.flexibility_intensity,
        }
    }
}

/// Preference creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePreferenceRequest {
    #[validate(length(min = 1, message = "At least one workout type is required"))]
    pub preferred_workout_types: Vec<WorkoutType>,

    pub available_equipment: Vec<Equipment>,

    #[validate(nested)]
    pub time_preference: TimePreferenceDto,

    #[validate(nested)]
    pub intensity_preference: IntensityPreferenceDto,

    #[validate(range(min = 1, max = 7, message = "Workouts per week must be 1-7"))]
    pub workouts_per_week: i32,

    #[serde(default)]
    pub needs_modification: bool,

    #[serde(default)]
    pub injury_considerations: Vec<String>,

    #[serde(default)]
    pub excluded_exercises: Vec<String>,

    pub prefer_group_workouts: bool,

    pub special_instructions: Option<String>,
}

/// Partial preference update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePreferenceRequest {
    pub preferred_workout_types: Option<Vec<WorkoutType>>,
    pub available_equipment: Option<Vec<Equipment>>,

    #[validate(nested)]
    pub time_preference: Option<TimePreferenceDto>,

    #[validate(nested)]
    pub intensity_preference: Option<IntensityPreferenceDto>,

    #[validate(range(min = 1, max = 7, message = "Workouts per week must be 1-7"))]
    pub workouts_per_week: Option<i32>,

    pub needs_modification: Option<bool>,
    pub injury_considerations: Option<Vec<String>>,
    pub excluded_exercises: Option<Vec<String>>,
    pub prefer_group_workouts: Option<bool>,
    pub special_instructions: Option<String>,
}

/// Partner matching query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    /// Allowed cardio intensity gap, default 1
    pub intensity_tolerance: Option<i32>,
    /// Require a shared preferred day, default true
    pub time_overlap: Option<bool>,
}

/// One matched workout partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerMatch {
    pub user_id: String,
    pub match_score: i32,
    pub matching_criteria: Vec<String>,
}

/// Aggregated preference statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceStatsResponse {
    pub workout_type_distribution: HashMap<String, i64>,
    pub average_intensities: AverageIntensities,
    pub popular_time_slots: Vec<TimeSlotCount>,
    pub group_preference: GroupPreferenceCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AverageIntensities {
    pub cardio: f64,
    pub strength: f64,
    pub flexibility: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimeSlotCount {
    pub time_slot: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupPreferenceCounts {
    pub group: i64,
    pub individual: i64,
}

/// Recommendation output.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommended_workouts: Vec<String>,
    pub recommended_equipment: Vec<String>,
    pub schedule_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreatePreferenceRequest {
        CreatePreferenceRequest {
            preferred_workout_types: vec![WorkoutType::Cardio, WorkoutType::Strength],
            available_equipment: vec![Equipment::Dumbbells],
            time_preference: TimePreferenceDto {
                preferred_days: vec!["monday".to_string(), "thursday".to_string()],
                preferred_time_slot: "evening".to_string(),
                preferred_duration: 60,
            },
            intensity_preference: IntensityPreferenceDto {
                cardio_intensity: 7,
                strength_intensity: 5,
                flexibility_intensity: 3,
            },
            workouts_per_week: 4,
            needs_modification: false,
            injury_considerations: vec![],
            excluded_exercises: vec![],
            prefer_group_workouts: true,
            special_instructions: None,
        }
    }

    #[test]
    fn test_valid_create_preference() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_workout_types_required() {
        let mut req = valid_create();
        req.preferred_workout_types.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_intensity_bounds() {
        let mut req = valid_create();
        req.intensity_preference.cardio_intensity = 11;
        assert!(req.validate().is_err());

        req.intensity_preference.cardio_intensity = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_workouts_per_week_bounds() {
        let mut req = valid_create();
        req.workouts_per_week = 8;
        assert!(req.validate().is_err());
    }
}
