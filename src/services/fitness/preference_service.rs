//! Workout preference business logic.
//!
//! Preference lifecycle, partner matching, community stats and the
//! balance recommendations. The match scorer is a free function so the
//! weights stay testable without a database.

use std::sync::Arc;

use log::info;
use mongodb::bson::{to_document, DateTime};
use singleton_macro::service;

use crate::domain::dto::fitness::preference::{
    AverageIntensities, CreatePreferenceRequest, GroupPreferenceCounts, MatchQuery, PartnerMatch,
    PreferenceStatsResponse, RecommendationsResponse, TimeSlotCount, UpdatePreferenceRequest,
};
use crate::domain::entities::fitness::preference::{WorkoutPreference, WorkoutType};
use crate::errors::errors::AppError;
use crate::repositories::fitness::preference_repo::PreferenceRepository;
use crate::repositories::fitness::profile_repo::parse_user_id;

/// Matches below this score are discarded.
const MATCH_SCORE_THRESHOLD: i32 = 20;

const DEFAULT_INTENSITY_TOLERANCE: i32 = 1;

/// The core workout types a balanced routine should cover.
const CORE_WORKOUT_TYPES: [WorkoutType; 3] =
    [WorkoutType::Cardio, WorkoutType::Strength, WorkoutType::Flexibility];

#[service(name = "preference")]
pub struct PreferenceService {
    preference_repo: Arc<PreferenceRepository>,
}

impl PreferenceService {
    pub async fn create_preferences(
        &self,
        user_id: &str,
        request: CreatePreferenceRequest,
    ) -> Result<WorkoutPreference, AppError> {
        let owner = parse_user_id(user_id)?;
        let now = DateTime::now();

        let preference = WorkoutPreference {
            id: None,
            user_id: owner,
            preferred_workout_types: request.preferred_workout_types,
            available_equipment: request.available_equipment,
            time_preference: request.time_preference.into(),
            intensity_preference: request.intensity_preference.into(),
            workouts_per_week: request.workouts_per_week,
            needs_modification: request.needs_modification,
            injury_considerations: request.injury_considerations,
            excluded_exercises: request.excluded_exercises,
            prefer_group_workouts: request.prefer_group_workouts,
            special_instructions: request.special_instructions,
            created_at: now,
            updated_at: now,
        };

        let created = self.preference_repo.create(preference).await?;
        info!("Created workout preferences for user {}", user_id);
        Ok(created)
    }

    pub async fn get_preferences(&self, user_id: &str) -> Result<WorkoutPreference, AppError> {
        self.preference_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout preferences not found".to_string()))
    }

    pub async fn update_preferences(
        &self,
        user_id: &str,
        request: UpdatePreferenceRequest,
    ) -> Result<WorkoutPreference, AppError> {
        let mut preference = self.get_preferences(user_id).await?;

        if let Some(preferred_workout_types) = request.preferred_workout_types {
            preference.preferred_workout_types = preferred_workout_types;
        }
        if let Some(available_equipment) = request.available_equipment {
            preference.available_equipment = available_equipment;
        }
        if let Some(time_preference) = request.time_preference {
            preference.time_preference = time_preference.into();
        }
        if let Some(intensity_preference) = request.intensity_preference {
            preference.intensity_preference = intensity_preference.into();
        }
        if let Some(workouts_per_week) = request.workouts_per_week {
            preference.workouts_per_week = workouts_per_week;
        }
        if let Some(needs_modification) = request.needs_modification {
            preference.needs_modification = needs_modification;
        }
        if let Some(injury_considerations) = request.injury_considerations {
            preference.injury_considerations = injury_considerations;
        }
        if let Some(excluded_exercises) = request.excluded_exercises {
            preference.excluded_exercises = excluded_exercises;
        }
        if let Some(prefer_group_workouts) = request.prefer_group_workouts {
            preference.prefer_group_workouts = prefer_group_workouts;
        }
        if let Some(special_instructions) = request.special_instructions {
            preference.special_instructions = Some(special_instructions);
        }

        let mut update_doc = to_document(&preference)
            .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?;
        update_doc.remove("_id");
        update_doc.remove("created_at");

        self.preference_repo
            .update(user_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout preferences not found".to_string()))
    }

    pub async fn delete_preferences(&self, user_id: &str) -> Result<(), AppError> {
        if !self.preference_repo.delete(user_id).await? {
            return Err(AppError::NotFound("Workout preferences not found".to_string()));
        }
        Ok(())
    }

    /// Ranks potential workout partners for the caller. Candidates
    /// must share the caller's first preferred workout type and score
    /// above the threshold.
    pub async fn find_matching_partners(
        &self,
        user_id: &str,
        query: MatchQuery,
    ) -> Result<Vec<PartnerMatch>, AppError> {
        let own = self.get_preferences(user_id).await?;
        let first_type = own.preferred_workout_types.first().copied().ok_or_else(|| {
            AppError::ValidationError("No preferred workout types set".to_string())
        })?;

        let tolerance = query.intensity_tolerance.unwrap_or(DEFAULT_INTENSITY_TOLERANCE);
        let time_overlap = query.time_overlap.unwrap_or(true);

        let candidates = self.preference_repo.find_by_workout_type(first_type).await?;

        let mut matches: Vec<PartnerMatch> = candidates
            .iter()
            .filter(|candidate| candidate.user_id != own.user_id)
            .filter_map(|candidate| {
                let (score, criteria) = match_score(&own, candidate, tolerance, time_overlap);
                if score > MATCH_SCORE_THRESHOLD {
                    Some(PartnerMatch {
                        user_id: candidate.user_id.to_hex(),
                        match_score: score,
                        matching_criteria: criteria,
                    })
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        Ok(matches)
    }

    pub async fn get_stats(&self) -> Result<PreferenceStatsResponse, AppError> {
        let workout_type_distribution = self.preference_repo.workout_type_distribution().await?;
        let (cardio, strength, flexibility) = self.preference_repo.average_intensities().await?;
        let popular_time_slots = self
            .preference_repo
            .popular_time_slots()
            .await?
            .into_iter()
            .map(|(time_slot, count)| TimeSlotCount { time_slot, count })
            .collect();
        let (group, individual) = self.preference_repo.group_preference_counts().await?;

        Ok(PreferenceStatsResponse {
            workout_type_distribution,
            average_intensities: AverageIntensities {
                cardio,
                strength,
                flexibility,
            },
            popular_time_slots,
            group_preference: GroupPreferenceCounts { group, individual },
        })
    }

    pub async fn get_recommendations(
        &self,
        user_id: &str,
    ) -> Result<RecommendationsResponse, AppError> {
        let preference = self.get_preferences(user_id).await?;
        Ok(recommendations(&preference))
    }
}

/// Scores a candidate partner against the caller's preferences.
/// Returns the total score and the criteria that contributed.
fn match_score(
    own: &WorkoutPreference,
    candidate: &WorkoutPreference,
    intensity_tolerance: i32,
    time_overlap: bool,
) -> (i32, Vec<String>) {
    let mut score = 0;
    let mut criteria = Vec::new();

    let shared_types = candidate
        .preferred_workout_types
        .iter()
        .filter(|t| own.preferred_workout_types.contains(t))
        .count() as i32;
    if shared_types > 0 {
        score += 10 * shared_types;
        criteria.push(format!("{} matching workout types", shared_types));
    }

    let intensity_diff = (own.intensity_preference.cardio_intensity
        - candidate.intensity_preference.cardio_intensity)
        .abs();
    if intensity_diff <= intensity_tolerance {
        score += 20;
        criteria.push("Similar intensity preferences".to_string());
    }

    if time_overlap {
        let overlap = candidate
            .time_preference
            .preferred_days
            .iter()
            .any(|day| own.time_preference.preferred_days.contains(day));
        if overlap {
            score += 15;
            criteria.push("Overlapping schedule".to_string());
        }
    }

    let shared_equipment = candidate
        .available_equipment
        .iter()
        .filter(|e| own.available_equipment.contains(e))
        .count() as i32;
    if shared_equipment > 0 {
        score += 5 * shared_equipment;
        criteria.push(format!("{} matching equipment", shared_equipment));
    }

    if own.prefer_group_workouts == candidate.prefer_group_workouts {
        score += 10;
        criteria.push("Matching group workout preference".to_string());
    }

    (score, criteria)
}

/// Suggestions for a more balanced routine.
fn recommendations(preference: &WorkoutPreference) -> RecommendationsResponse {
    let mut recommended_workouts = Vec::new();
    let mut recommended_equipment = Vec::new();
    let mut schedule_suggestions = Vec::new();

    if preference.preferred_workout_types.len() < 3 {
        let missing: Vec<&str> = CORE_WORKOUT_TYPES
            .iter()
            .filter(|t| !preference.preferred_workout_types.contains(t))
            .map(WorkoutType::as_str)
            .collect();
        if !missing.is_empty() {
            recommended_workouts.push(format!(
                "Consider adding {} to your routine for a more balanced workout",
                missing.join(", ")
            ));
        }
    }

    if preference.available_equipment.len() < 3 {
        recommended_equipment.push(
            "Consider adding resistance bands or dumbbells for more workout variety".to_string(),
        );
    }

    if preference.time_preference.preferred_days.len() < 3 {
        schedule_suggestions
            .push("Try to schedule at least 3 workout days per week".to_string());
    }
    if preference.time_preference.preferred_duration < 45 {
        schedule_suggestions
            .push("Consider extending workout sessions to 45-60 minutes".to_string());
    }

    RecommendationsResponse {
        recommended_workouts,
        recommended_equipment,
        schedule_suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fitness::preference::{
        Equipment, IntensityPreference, TimePreference,
    };
    use mongodb::bson::oid::ObjectId;

    fn preference_with(
        types: Vec<WorkoutType>,
        days: Vec<&str>,
        cardio: i32,
        equipment: Vec<Equipment>,
        group: bool,
    ) -> WorkoutPreference {
        let now = DateTime::now();
        WorkoutPreference {
            id: None,
            user_id: ObjectId::new(),
            preferred_workout_types: types,
            available_equipment: equipment,
            time_preference: TimePreference {
                preferred_days: days.into_iter().map(String::from).collect(),
                preferred_time_slot: "morning".to_string(),
                preferred_duration: 60,
            },
            intensity_preference: IntensityPreference {
                cardio_intensity: cardio,
                strength_intensity: 5,
                flexibility_intensity: 5,
            },
            workouts_per_week: 3,
            needs_modification: false,
            injury_considerations: vec![],
            excluded_exercises: vec![],
            prefer_group_workouts: group,
            special_instructions: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn full_overlap_scores_every_criterion() {
        let own = preference_with(
            vec![WorkoutType::Cardio, WorkoutType::Strength],
            vec!["monday", "wednesday"],
            5,
            vec![Equipment::Dumbbells],
            true,
        );
        let other = preference_with(
            vec![WorkoutType::Cardio, WorkoutType::Strength],
            vec!["monday"],
            6,
            vec![Equipment::Dumbbells],
            true,
        );

        let (score, criteria) = match_score(&own, &other, 1, true);
        // 2 types (20) + intensity (20) + schedule (15) + equipment (5) + group (10)
        assert_eq!(score, 70);
        assert_eq!(criteria.len(), 5);
        assert!(criteria.contains(&"2 matching workout types".to_string()));
        assert!(criteria.contains(&"Overlapping schedule".to_string()));
    }

    #[test]
    fn intensity_outside_tolerance_scores_nothing_for_it() {
        let own = preference_with(vec![WorkoutType::Cardio], vec!["monday"], 2, vec![], true);
        let other = preference_with(vec![WorkoutType::Cardio], vec!["friday"], 8, vec![], false);

        let (score, criteria) = match_score(&own, &other, 1, true);
        // only the shared type counts
        assert_eq!(score, 10);
        assert_eq!(criteria, vec!["1 matching workout types".to_string()]);
    }

    #[test]
    fn time_overlap_flag_disables_schedule_criterion() {
        let own = preference_with(vec![WorkoutType::Yoga], vec!["monday"], 5, vec![], true);
        let other = preference_with(vec![WorkoutType::Yoga], vec!["monday"], 5, vec![], true);

        let (with_overlap, _) = match_score(&own, &other, 1, true);
        let (without_overlap, _) = match_score(&own, &other, 1, false);
        assert_eq!(with_overlap - without_overlap, 15);
    }

    #[test]
    fn recommends_missing_core_types() {
        let preference =
            preference_with(vec![WorkoutType::Cardio], vec!["monday"], 5, vec![], true);
        let result = recommendations(&preference);

        assert_eq!(result.recommended_workouts.len(), 1);
        assert!(result.recommended_workouts[0].contains("STRENGTH"));
        assert!(result.recommended_workouts[0].contains("FLEXIBILITY"));
        assert!(!result.recommended_workouts[0].contains("CARDIO,"));
    }

    #[test]
    fn balanced_preferences_get_no_suggestions() {
        let mut preference = preference_with(
            vec![WorkoutType::Cardio, WorkoutType::Strength, WorkoutType::Flexibility],
            vec!["monday", "wednesday", "friday"],
            5,
            vec![Equipment::Dumbbells, Equipment::Barbells, Equipment::Kettlebells],
            true,
        );
        preference.time_preference.preferred_duration = 60;

        let result = recommendations(&preference);
        assert!(result.recommended_workouts.is_empty());
        assert!(result.recommended_equipment.is_empty());
        assert!(result.schedule_suggestions.is_empty());
    }
}
