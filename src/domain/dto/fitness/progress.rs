//! Fitness progress request/response DTOs.

use std::collections::HashMap;

use chrono::{DateTime as ChronoDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::fitness::progress::{
    BodyMeasurements, FitnessMetrics, Measurement,
};

/// Creates a progress document, optionally seeded with history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProgressRequest {
    pub body_measurements: Option<BodyMeasurements>,
    pub fitness_metrics: Option<FitnessMetrics>,
}

/// Replaces embedded series wholesale. Day-to-day tracking should go
/// through the measurement endpoints instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgressRequest {
    pub body_measurements: Option<BodyMeasurements>,
    pub fitness_metrics: Option<FitnessMetrics>,
    pub progress_percentages: Option<HashMap<String, f64>>,
}

/// Records one data point into a measurement or metric series.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMeasurementRequest {
    /// Series name, e.g. "weight" or "push_ups"
    #[validate(length(min = 1, message = "Measurement type is required"))]
    pub r#type: String,

    #[validate(range(min = 0.0, message = "Value must be non-negative"))]
    pub value: f64,

    pub notes: Option<String>,
}

/// History query over one series.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Series name
    pub r#type: String,
    pub start_date: ChronoDateTime<Utc>,
    /// Defaults to now
    pub end_date: Option<ChronoDateTime<Utc>>,
}

/// Windowed progress query over one series.
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// Series name
    pub r#type: String,
    pub period: ProgressPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPeriod {
    Week,
    Month,
    Year,
}

/// Direction of a measured change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Change of one series over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub change: f64,
    pub change_percentage: f64,
    pub trend: Trend,
}

/// Series history, newest first.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub r#type: String,
    pub measurements: Vec<Measurement>,
}

/// Aggregate statistics across all metric series.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressStatsResponse {
    /// Distinct workout days
    pub total_workouts: u64,
    pub average_metrics: HashMap<String, f64>,
    pub personal_bests: HashMap<String, f64>,
}

/// Trend analysis output.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendAnalysisResponse {
    pub improvements: Vec<String>,
    pub areas_to_focus: Vec<String>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_measurement_validation() {
        let valid = AddMeasurementRequest {
            r#type: "weight".to_string(),
            value: 72.5,
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let negative = AddMeasurementRequest {
            r#type: "weight".to_string(),
            value: -1.0,
            notes: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_period_deserialization() {
        let period: ProgressPeriod = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(period, ProgressPeriod::Month);
        assert!(serde_json::from_str::<ProgressPeriod>("\"decade\"").is_err());
    }

    #[test]
    fn test_trend_serialization() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Trend::Stable).unwrap(), "\"stable\"");
    }
}
