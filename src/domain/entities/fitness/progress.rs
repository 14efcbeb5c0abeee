//! Fitness Progress Entity Implementation
//!
//! One `fitness_progress` document per user, holding time series of
//! body measurements and performance metrics. Every series is stored
//! newest-first and capped at [`SERIES_CAP`] entries.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of entries kept per measurement series.
pub const SERIES_CAP: i32 = 100;

/// Valid body measurement series names.
pub const BODY_SERIES: [&str; 7] =
    ["weight", "body_fat", "chest", "waist", "hips", "biceps", "thighs"];

/// Valid fitness metric series names.
pub const METRIC_SERIES: [&str; 6] = [
    "push_ups",
    "pull_ups",
    "squats",
    "plank_time",
    "running_distance",
    "running_time",
];

/// A single dated data point within a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub date: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body measurement series. Units: weight in kg, body fat in
/// percent, the rest in cm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyMeasurements {
    #[serde(default)]
    pub weight: Vec<Measurement>,
    #[serde(default)]
    pub body_fat: Vec<Measurement>,
    #[serde(default)]
    pub chest: Vec<Measurement>,
    #[serde(default)]
    pub waist: Vec<Measurement>,
    #[serde(default)]
    pub hips: Vec<Measurement>,
    #[serde(default)]
    pub biceps: Vec<Measurement>,
    #[serde(default)]
    pub thighs: Vec<Measurement>,
}

impl BodyMeasurements {
    pub fn series(&self, name: &str) -> Option<&Vec<Measurement>> {
        match name {
            "weight" => Some(&self.weight),
            "body_fat" => Some(&self.body_fat),
            "chest" => Some(&self.chest),
            "waist" => Some(&self.waist),
            "hips" => Some(&self.hips),
            "biceps" => Some(&self.biceps),
            "thighs" => Some(&self.thighs),
            _ => None,
        }
    }
}

/// Performance metric series. Rep counts are per minute, plank time
/// in seconds, running distance in km, running time in minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitnessMetrics {
    #[serde(default)]
    pub push_ups: Vec<Measurement>,
    #[serde(default)]
    pub pull_ups: Vec<Measurement>,
    #[serde(default)]
    pub squats: Vec<Measurement>,
    #[serde(default)]
    pub plank_time: Vec<Measurement>,
    #[serde(default)]
    pub running_distance: Vec<Measurement>,
    #[serde(default)]
    pub running_time: Vec<Measurement>,
}

impl FitnessMetrics {
    pub fn series(&self, name: &str) -> Option<&Vec<Measurement>> {
        match name {
            "push_ups" => Some(&self.push_ups),
            "pull_ups" => Some(&self.pull_ups),
            "squats" => Some(&self.squats),
            "plank_time" => Some(&self.plank_time),
            "running_distance" => Some(&self.running_distance),
            "running_time" => Some(&self.running_time),
            _ => None,
        }
    }

    /// All metric series in declaration order.
    pub fn all_series(&self) -> [&Vec<Measurement>; 6] {
        [
            &self.push_ups,
            &self.pull_ups,
            &self.squats,
            &self.plank_time,
            &self.running_distance,
            &self.running_time,
        ]
    }
}

/// Fitness progress entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessProgress {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user (unique)
    pub user_id: ObjectId,
    #[serde(default)]
    pub body_measurements: BodyMeasurements,
    #[serde(default)]
    pub fitness_metrics: FitnessMetrics,
    /// Cached per-series progress percentages
    #[serde(default)]
    pub progress_percentages: HashMap<String, f64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl FitnessProgress {
    /// Creates an empty progress document for `user_id`.
    pub fn new(user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            user_id,
            body_measurements: BodyMeasurements::default(),
            fitness_metrics: FitnessMetrics::default(),
            progress_percentages: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Looks up a series by its qualified name, body measurements
    /// first, then fitness metrics.
    pub fn series(&self, name: &str) -> Option<&Vec<Measurement>> {
        self.body_measurements
            .series(name)
            .or_else(|| self.fitness_metrics.series(name))
    }

    /// Number of distinct calendar days with at least one recorded
    /// fitness metric. Used as the workout count.
    pub fn count_workout_days(&self) -> usize {
        let mut days = std::collections::HashSet::new();
        for series in self.fitness_metrics.all_series() {
            for measurement in series {
                // DateTime has millisecond precision; truncate to days
                days.insert(measurement.date.timestamp_millis() / 86_400_000);
            }
        }
        days.len()
    }
}

/// Returns true when `name` is a known body measurement series.
pub fn is_body_series(name: &str) -> bool {
    BODY_SERIES.contains(&name)
}

/// Returns true when `name` is a known fitness metric series.
pub fn is_metric_series(name: &str) -> bool {
    METRIC_SERIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement_at(value: f64, millis: i64) -> Measurement {
        Measurement {
            value,
            date: DateTime::from_millis(millis),
            notes: None,
        }
    }

    #[test]
    fn test_series_name_validation() {
        assert!(is_body_series("weight"));
        assert!(is_body_series("body_fat"));
        assert!(!is_body_series("push_ups"));

        assert!(is_metric_series("push_ups"));
        assert!(is_metric_series("running_time"));
        assert!(!is_metric_series("weight"));
        assert!(!is_metric_series("bench_press"));
    }

    #[test]
    fn test_series_lookup() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        progress.body_measurements.waist.push(measurement_at(80.0, 0));
        progress.fitness_metrics.squats.push(measurement_at(30.0, 0));

        assert_eq!(progress.series("waist").unwrap().len(), 1);
        assert_eq!(progress.series("squats").unwrap().len(), 1);
        assert!(progress.series("unknown").is_none());
    }

    #[test]
    fn test_count_workout_days_deduplicates_same_day() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        let day = 86_400_000i64;

        // Two metrics on day 1, one on day 2
        progress.fitness_metrics.push_ups.push(measurement_at(20.0, day));
        progress.fitness_metrics.squats.push(measurement_at(30.0, day + 3_600_000));
        progress.fitness_metrics.pull_ups.push(measurement_at(5.0, 2 * day));

        assert_eq!(progress.count_workout_days(), 2);
    }

    #[test]
    fn test_count_workout_days_ignores_body_measurements() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        progress.body_measurements.weight.push(measurement_at(70.0, 0));
        assert_eq!(progress.count_workout_days(), 0);
    }
}
