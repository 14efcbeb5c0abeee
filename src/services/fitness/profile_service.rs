//! Fitness profile business logic.
//!
//! Profile lifecycle plus the derived views: completion status,
//! nearby lookup and the search/stats queries. The completion
//! percentage is recomputed on every write so reads never have to.

use std::sync::Arc;

use chrono::{Months, Utc};
use log::info;
use mongodb::bson::{doc, to_document, DateTime, Document};
use singleton_macro::service;

use crate::domain::dto::fitness::profile::{
    CompletionResponse, CreateProfileRequest, NearbyQuery, ProfileListResponse,
    ProfileSearchQuery, ProfileStatsResponse, UpdateProfileRequest,
};
use crate::domain::entities::fitness::profile::{FitnessLevel, Profile};
use crate::errors::errors::AppError;
use crate::repositories::fitness::profile_repo::{
    parse_user_id, ProfileRepository, EARTH_RADIUS_METERS,
};

/// Default nearby-search radius in meters.
const DEFAULT_NEARBY_DISTANCE_M: f64 = 5_000.0;

const DEFAULT_PAGE_LIMIT: u64 = 10;

#[service(name = "profile")]
pub struct ProfileService {
    profile_repo: Arc<ProfileRepository>,
}

impl ProfileService {
    /// Creates the caller's profile. One per user.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - a profile already exists
    /// * `AppError::ValidationError` - malformed user id
    pub async fn create_profile(
        &self,
        user_id: &str,
        request: CreateProfileRequest,
    ) -> Result<Profile, AppError> {
        let owner = parse_user_id(user_id)?;
        let now = DateTime::now();

        let mut profile = Profile {
            id: None,
            user_id: owner,
            date_of_birth: DateTime::from_millis(request.date_of_birth.timestamp_millis()),
            gender: request.gender,
            address: request.address.into(),
            emergency_contact: request.emergency_contact.into(),
            height: request.height,
            weight: request.weight,
            body_fat_percentage: request.body_fat_percentage,
            fitness_level: request.fitness_level.unwrap_or(FitnessLevel::Beginner),
            fitness_goals: request.fitness_goals,
            preferred_workout_types: request.preferred_workout_types,
            preferred_workout_days: request.preferred_workout_days,
            preferred_workout_time: request.preferred_workout_time,
            health_info: request.health_info.map(Into::into),
            receive_notifications: request.receive_notifications.unwrap_or(true),
            receive_emails: request.receive_emails.unwrap_or(true),
            receive_sms: request.receive_sms.unwrap_or(false),
            preferred_language: request.preferred_language.unwrap_or_else(|| "en".to_string()),
            completion_percentage: 0,
            created_at: now,
            updated_at: now,
        };
        profile.completion_percentage = profile.calculate_completion_percentage();

        let created = self.profile_repo.create(profile).await?;
        info!("Created profile for user {}", user_id);
        Ok(created)
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppError> {
        self.profile_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Applies a partial update and recomputes the completion
    /// percentage from the merged result.
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        let mut profile = self.get_profile(user_id).await?;

        if let Some(date_of_birth) = request.date_of_birth {
            profile.date_of_birth = DateTime::from_millis(date_of_birth.timestamp_millis());
        }
        if let Some(gender) = request.gender {
            profile.gender = gender;
        }
        if let Some(address) = request.address {
            profile.address = address.into();
        }
        if let Some(emergency_contact) = request.emergency_contact {
            profile.emergency_contact = emergency_contact.into();
        }
        if let Some(height) = request.height {
            profile.height = Some(height);
        }
        if let Some(weight) = request.weight {
            profile.weight = Some(weight);
        }
        if let Some(body_fat_percentage) = request.body_fat_percentage {
            profile.body_fat_percentage = Some(body_fat_percentage);
        }
        if let Some(fitness_level) = request.fitness_level {
            profile.fitness_level = fitness_level;
        }
        if let Some(fitness_goals) = request.fitness_goals {
            profile.fitness_goals = fitness_goals;
        }
        if let Some(preferred_workout_types) = request.preferred_workout_types {
            profile.preferred_workout_types = preferred_workout_types;
        }
        if let Some(preferred_workout_days) = request.preferred_workout_days {
            profile.preferred_workout_days = preferred_workout_days;
        }
        if let Some(preferred_workout_time) = request.preferred_workout_time {
            profile.preferred_workout_time = Some(preferred_workout_time);
        }
        if let Some(health_info) = request.health_info {
            profile.health_info = Some(health_info.into());
        }
        if let Some(receive_notifications) = request.receive_notifications {
            profile.receive_notifications = receive_notifications;
        }
        if let Some(receive_emails) = request.receive_emails {
            profile.receive_emails = receive_emails;
        }
        if let Some(receive_sms) = request.receive_sms {
            profile.receive_sms = receive_sms;
        }
        if let Some(preferred_language) = request.preferred_language {
            profile.preferred_language = preferred_language;
        }

        profile.completion_percentage = profile.calculate_completion_percentage();

        let mut update_doc = to_document(&profile)
            .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?;
        update_doc.remove("_id");
        update_doc.remove("created_at");

        self.profile_repo
            .update(user_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn delete_profile(&self, user_id: &str) -> Result<(), AppError> {
        if !self.profile_repo.delete(user_id).await? {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }
        Ok(())
    }

    /// Profiles near a point, excluding the caller.
    pub async fn find_nearby(
        &self,
        user_id: &str,
        query: NearbyQuery,
    ) -> Result<Vec<Profile>, AppError> {
        let max_distance = query.max_distance.unwrap_or(DEFAULT_NEARBY_DISTANCE_M);
        self.profile_repo
            .find_near(query.longitude, query.latitude, max_distance, user_id)
            .await
    }

    /// Paginated search over fitness level, goals, age range and
    /// location. Age bounds translate into a date-of-birth window.
    pub async fn search(&self, query: ProfileSearchQuery) -> Result<ProfileListResponse, AppError> {
        let filter = search_filter(&query, Utc::now());

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64).clamp(1, 100) as u64;

        let (profiles, total) = self.profile_repo.find_paginated(filter, page, limit).await?;
        let total_pages = total.div_ceil(limit);

        Ok(ProfileListResponse {
            profiles,
            total,
            page,
            total_pages,
        })
    }

    /// Completion percentage plus the names of the optional fields
    /// still unset.
    pub async fn get_completion(&self, user_id: &str) -> Result<CompletionResponse, AppError> {
        let profile = self.get_profile(user_id).await?;

        let mut missing_fields = Vec::new();
        if profile.height.is_none() {
            missing_fields.push("height".to_string());
        }
        if profile.weight.is_none() {
            missing_fields.push("weight".to_string());
        }
        if profile.fitness_goals.is_empty() {
            missing_fields.push("fitness_goals".to_string());
        }
        if profile.preferred_workout_types.is_empty() {
            missing_fields.push("preferred_workout_types".to_string());
        }
        if profile.health_info.is_none() {
            missing_fields.push("health_info".to_string());
        }

        Ok(CompletionResponse {
            completion_percentage: profile.completion_percentage,
            missing_fields,
        })
    }

    pub async fn get_stats(&self) -> Result<ProfileStatsResponse, AppError> {
        let total_profiles = self.profile_repo.count().await?;
        let average_completion = self.profile_repo.average_completion().await?;
        let fitness_level_distribution = self.profile_repo.fitness_level_distribution().await?;
        let goal_distribution = self.profile_repo.goal_distribution().await?;

        Ok(ProfileStatsResponse {
            total_profiles,
            average_completion,
            fitness_level_distribution,
            goal_distribution,
        })
    }
}

/// Builds the Mongo filter for the profile search.
fn search_filter(query: &ProfileSearchQuery, now: chrono::DateTime<Utc>) -> Document {
    let mut filter = Document::new();

    if let Some(level) = query.fitness_level {
        filter.insert("fitness_level", level.as_str());
    }
    if let Some(goals) = &query.goals {
        let goals: Vec<&str> = goals.split(',').map(str::trim).filter(|g| !g.is_empty()).collect();
        if !goals.is_empty() {
            filter.insert("fitness_goals", doc! { "$in": goals });
        }
    }

    let mut dob_bounds = Document::new();
    if let Some(min_age) = query.min_age {
        let latest_dob = now
            .checked_sub_months(Months::new((min_age * 12).max(0) as u32))
            .unwrap_or(now);
        dob_bounds.insert("$lte", DateTime::from_millis(latest_dob.timestamp_millis()));
    }
    if let Some(max_age) = query.max_age {
        let earliest_dob = now
            .checked_sub_months(Months::new(((max_age + 1) * 12).max(0) as u32))
            .unwrap_or(now);
        dob_bounds.insert("$gte", DateTime::from_millis(earliest_dob.timestamp_millis()));
    }
    if !dob_bounds.is_empty() {
        filter.insert("date_of_birth", dob_bounds);
    }

    if let (Some(longitude), Some(latitude)) = (query.longitude, query.latitude) {
        let radius_radians =
            query.max_distance.unwrap_or(DEFAULT_NEARBY_DISTANCE_M) / EARTH_RADIUS_METERS;
        filter.insert(
            "address.location",
            doc! {
                "$geoWithin": {
                    "$centerSphere": [[longitude, latitude], radius_radians]
                }
            },
        );
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filter_includes_location_when_coordinates_given() {
        let query = ProfileSearchQuery {
            longitude: Some(126.978),
            latitude: Some(37.566),
            max_distance: Some(10_000.0),
            ..Default::default()
        };

        let filter = search_filter(&query, Utc::now());
        let geo = filter
            .get_document("address.location")
            .expect("geo filter missing")
            .get_document("$geoWithin")
            .expect("$geoWithin missing");
        let sphere = geo.get_array("$centerSphere").expect("$centerSphere missing");
        assert_eq!(sphere.len(), 2);

        // 10 km on a 6371 km sphere
        let radius = sphere[1].as_f64().expect("radius not a double");
        assert!((radius - 10_000.0 / EARTH_RADIUS_METERS).abs() < 1e-9);
    }

    #[test]
    fn search_filter_skips_location_without_both_coordinates() {
        let query = ProfileSearchQuery {
            longitude: Some(126.978),
            ..Default::default()
        };
        assert!(!search_filter(&query, Utc::now()).contains_key("address.location"));
        assert!(search_filter(&ProfileSearchQuery::default(), Utc::now()).is_empty());
    }

    #[test]
    fn search_filter_builds_dob_window_from_age_range() {
        let query = ProfileSearchQuery {
            min_age: Some(20),
            max_age: Some(30),
            ..Default::default()
        };

        let filter = search_filter(&query, Utc::now());
        let dob = filter.get_document("date_of_birth").expect("dob window missing");
        let latest = dob.get_datetime("$lte").expect("$lte missing");
        let earliest = dob.get_datetime("$gte").expect("$gte missing");
        assert!(earliest < latest);
    }
}
