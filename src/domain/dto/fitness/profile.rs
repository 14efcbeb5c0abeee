//! Profile request/response DTOs.

use std::collections::HashMap;

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::fitness::profile::{
    Address, EmergencyContact, FitnessGoal, FitnessLevel, Gender, HealthInformation, Profile,
};

/// Address payload. `location` is `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressDto {
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,

    #[validate(custom(function = "validate_location"))]
    pub location: Option<[f64; 2]>,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            street: dto.street,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            location: dto.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmergencyContactDto {
    #[validate(length(min = 1, message = "Contact name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Relationship is required"))]
    pub relationship: String,

    #[validate(length(min = 1, message = "Contact phone number is required"))]
    pub phone_number: String,
}

impl From<EmergencyContactDto> for EmergencyContact {
    fn from(dto: EmergencyContactDto) -> Self {
        EmergencyContact {
            name: dto.name,
            relationship: dto.relationship,
            phone_number: dto.phone_number,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HealthInformationDto {
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    pub blood_type: Option<String>,
    pub last_medical_checkup: Option<ChronoDateTime<Utc>>,
    #[serde(default)]
    pub has_insurance: bool,
    pub insurance_provider: Option<String>,
    pub insurance_policy_number: Option<String>,
}

impl From<HealthInformationDto> for HealthInformation {
    fn from(dto: HealthInformationDto) -> Self {
        HealthInformation {
            medical_conditions: dto.medical_conditions,
            allergies: dto.allergies,
            medications: dto.medications,
            blood_type: dto.blood_type,
            last_medical_checkup: dto
                .last_medical_checkup
                .map(|dt| DateTime::from_millis(dt.timestamp_millis())),
            has_insurance: dto.has_insurance,
            insurance_provider: dto.insurance_provider,
            insurance_policy_number: dto.insurance_policy_number,
        }
    }
}

/// Profile creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    pub date_of_birth: ChronoDateTime<Utc>,
    pub gender: Gender,

    #[validate(nested)]
    pub address: AddressDto,

    #[validate(nested)]
    pub emergency_contact: EmergencyContactDto,

    /// Height in centimeters
    #[validate(range(min = 0.0, message = "Height must be positive"))]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[validate(range(min = 0.0, message = "Weight must be positive"))]
    pub weight: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "Body fat must be 0-100"))]
    pub body_fat_percentage: Option<f64>,

    pub fitness_level: Option<FitnessLevel>,

    #[serde(default)]
    pub fitness_goals: Vec<FitnessGoal>,

    #[serde(default)]
    pub preferred_workout_types: Vec<String>,

    #[serde(default)]
    pub preferred_workout_days: Vec<String>,

    pub preferred_workout_time: Option<String>,

    #[validate(nested)]
    pub health_info: Option<HealthInformationDto>,

    pub receive_notifications: Option<bool>,
    pub receive_emails: Option<bool>,
    pub receive_sms: Option<bool>,
    pub preferred_language: Option<String>,
}

/// Partial profile update. Absent fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub date_of_birth: Option<ChronoDateTime<Utc>>,
    pub gender: Option<Gender>,

    #[validate(nested)]
    pub address: Option<AddressDto>,

    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContactDto>,

    #[validate(range(min = 0.0, message = "Height must be positive"))]
    pub height: Option<f64>,

    #[validate(range(min = 0.0, message = "Weight must be positive"))]
    pub weight: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "Body fat must be 0-100"))]
    pub body_fat_percentage: Option<f64>,

    pub fitness_level: Option<FitnessLevel>,
    pub fitness_goals: Option<Vec<FitnessGoal>>,
    pub preferred_workout_types: Option<Vec<String>>,
    pub preferred_workout_days: Option<Vec<String>>,
    pub preferred_workout_time: Option<String>,

    #[validate(nested)]
    pub health_info: Option<HealthInformationDto>,

    pub receive_notifications: Option<bool>,
    pub receive_emails: Option<bool>,
    pub receive_sms: Option<bool>,
    pub preferred_language: Option<String>,
}

/// Query parameters of the nearby search.
#[derive(Debug, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be -180..180"))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be -90..90"))]
    pub latitude: f64,

    /// Search radius in meters, default 5000
    #[validate(range(min = 1.0, message = "Distance must be positive"))]
    pub max_distance: Option<f64>,
}

/// Query parameters of the filtered profile search.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileSearchQuery {
    pub fitness_level: Option<FitnessLevel>,
    /// Comma-separated goal list, matched with `$in`
    pub goals: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    /// Geo filter center; only applied when latitude is also set
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Geo filter radius in meters, default 5000
    pub max_distance: Option<f64>,
    pub page: Option<u64>,
    pub limit: Option<i64>,
}

/// Paginated profile listing.
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<Profile>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Completion status of a profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub completion_percentage: i32,
    pub missing_fields: Vec<String>,
}

/// Aggregated profile statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileStatsResponse {
    pub total_profiles: u64,
    pub average_completion: f64,
    pub fitness_level_distribution: HashMap<String, i64>,
    pub goal_distribution: HashMap<String, i64>,
}

fn validate_location(location: &[f64; 2]) -> Result<(), ValidationError> {
    let [longitude, latitude] = *location;
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::new("invalid_location")
            .with_message("Location must be [longitude, latitude] within valid ranges".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProfileRequest {
        CreateProfileRequest {
            date_of_birth: "1990-05-01T00:00:00Z".parse().unwrap(),
            gender: Gender::Male,
            address: AddressDto {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                location: Some([-89.65, 39.78]),
            },
            emergency_contact: EmergencyContactDto {
                name: "Jane Doe".to_string(),
                relationship: "spouse".to_string(),
                phone_number: "+1-555-0100".to_string(),
            },
            height: Some(180.0),
            weight: Some(80.0),
            body_fat_percentage: Some(18.0),
            fitness_level: Some(FitnessLevel::Intermediate),
            fitness_goals: vec![FitnessGoal::Strength],
            preferred_workout_types: vec!["STRENGTH".to_string()],
            preferred_workout_days: vec!["monday".to_string()],
            preferred_workout_time: Some("evening".to_string()),
            health_info: None,
            receive_notifications: None,
            receive_emails: None,
            receive_sms: None,
            preferred_language: None,
        }
    }

    #[test]
    fn test_valid_create_profile() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_invalid_location_rejected() {
        let mut req = valid_create();
        req.address.location = Some([200.0, 39.78]);
        assert!(req.validate().is_err());

        req.address.location = Some([-89.65, 95.0]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_body_fat_out_of_range_rejected() {
        let mut req = valid_create();
        req.body_fat_percentage = Some(120.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nearby_query_ranges() {
        let valid = NearbyQuery {
            longitude: 127.02,
            latitude: 37.49,
            max_distance: Some(5000.0),
        };
        assert!(valid.validate().is_ok());

        let invalid = NearbyQuery {
            longitude: 181.0,
            latitude: 0.0,
            max_distance: None,
        };
        assert!(invalid.validate().is_err());
    }
}
