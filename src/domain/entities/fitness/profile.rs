//! Profile Entity Implementation
//!
//! Member profile document: personal information, physical
//! attributes, fitness classification and health data.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Self-reported fitness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
            FitnessLevel::Expert => "expert",
        }
    }
}

/// Training goals a member can pursue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
    Strength,
    GeneralFitness,
    AthleticPerformance,
    Rehabilitation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Postal address with an optional geo position.
///
/// `location` holds `[longitude, latitude]` and is indexed as
/// 2dsphere for proximity queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone_number: String,
}

/// Medical background attached to a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInformation {
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_medical_checkup: Option<DateTime>,
    #[serde(default)]
    pub has_insurance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_policy_number: Option<String>,
}

/// Profile entity
///
/// One document per user in the `profiles` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user (unique)
    pub user_id: ObjectId,
    pub date_of_birth: DateTime,
    pub gender: Gender,
    pub address: Address,
    pub emergency_contact: EmergencyContact,
    /// Height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub fitness_goals: Vec<FitnessGoal>,
    #[serde(default)]
    pub preferred_workout_types: Vec<String>,
    #[serde(default)]
    pub preferred_workout_days: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_workout_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_info: Option<HealthInformation>,
    pub receive_notifications: bool,
    pub receive_emails: bool,
    pub receive_sms: bool,
    pub preferred_language: String,
    /// Cached completion score, recomputed on every write
    pub completion_percentage: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Profile {
    /// Computes how complete the profile is, as a rounded percentage.
    ///
    /// Ten fields participate: date of birth, gender, address,
    /// emergency contact, height, weight, fitness level, fitness
    /// goals, workout types and health info. Lists only count when
    /// non-empty.
    pub fn calculate_completion_percentage(&self) -> i32 {
        let completed = [
            true, // date_of_birth is required
            true, // gender is required
            true, // address is required
            true, // emergency_contact is required
            self.height.is_some(),
            self.weight.is_some(),
            true, // fitness_level is required
            !self.fitness_goals.is_empty(),
            !self.preferred_workout_types.is_empty(),
            self.health_info.is_some(),
        ];

        let count = completed.iter().filter(|c| **c).count();
        ((count as f64 / completed.len() as f64) * 100.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> Profile {
        Profile {
            id: None,
            user_id: ObjectId::new(),
            date_of_birth: DateTime::now(),
            gender: Gender::Female,
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                location: None,
            },
            emergency_contact: EmergencyContact {
                name: "John Doe".to_string(),
                relationship: "spouse".to_string(),
                phone_number: "+1-555-0100".to_string(),
            },
            height: None,
            weight: None,
            body_fat_percentage: None,
            fitness_level: FitnessLevel::Beginner,
            fitness_goals: vec![],
            preferred_workout_types: vec![],
            preferred_workout_days: vec![],
            preferred_workout_time: None,
            health_info: None,
            receive_notifications: true,
            receive_emails: true,
            receive_sms: true,
            preferred_language: "en".to_string(),
            completion_percentage: 0,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_completion_with_required_fields_only() {
        // 5 of 10 fields present (the required ones)
        let profile = base_profile();
        assert_eq!(profile.calculate_completion_percentage(), 50);
    }

    #[test]
    fn test_completion_full_profile() {
        let mut profile = base_profile();
        profile.height = Some(170.0);
        profile.weight = Some(65.0);
        profile.fitness_goals = vec![FitnessGoal::Endurance];
        profile.preferred_workout_types = vec!["CARDIO".to_string()];
        profile.health_info = Some(HealthInformation {
            medical_conditions: vec![],
            allergies: vec![],
            medications: vec![],
            blood_type: None,
            last_medical_checkup: None,
            has_insurance: false,
            insurance_provider: None,
            insurance_policy_number: None,
        });
        assert_eq!(profile.calculate_completion_percentage(), 100);
    }

    #[test]
    fn test_completion_partial_profile() {
        let mut profile = base_profile();
        profile.height = Some(180.0);
        profile.fitness_goals = vec![FitnessGoal::Strength];
        // 7 of 10 fields
        assert_eq!(profile.calculate_completion_percentage(), 70);
    }

    #[test]
    fn test_fitness_level_serialization() {
        assert_eq!(serde_json::to_string(&FitnessLevel::Beginner).unwrap(), "\"beginner\"");
        let level: FitnessLevel = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(level, FitnessLevel::Expert);
    }

    #[test]
    fn test_fitness_goal_serialization() {
        assert_eq!(
            serde_json::to_string(&FitnessGoal::WeightLoss).unwrap(),
            "\"weight_loss\""
        );
        let goal: FitnessGoal = serde_json::from_str("\"athletic_performance\"").unwrap();
        assert_eq!(goal, FitnessGoal::AthleticPerformance);
    }
}
