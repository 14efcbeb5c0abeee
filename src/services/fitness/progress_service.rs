//! Fitness progress business logic.
//!
//! Measurement recording plus the analytic views: history windows,
//! windowed progress, aggregate stats and trend analysis. Trend
//! arithmetic lives in free functions so it stays testable without a
//! database.

use chrono::{Duration, Utc};
use log::info;
use mongodb::bson::{to_bson, DateTime, Document};
use singleton_macro::service;
use std::sync::Arc;

use crate::domain::dto::fitness::progress::{
    AddMeasurementRequest, CreateProgressRequest, HistoryQuery, HistoryResponse, ProgressPeriod,
    ProgressQuery, ProgressResponse, ProgressStatsResponse, Trend, TrendAnalysisResponse,
    UpdateProgressRequest,
};
use crate::domain::entities::fitness::progress::{
    is_body_series, is_metric_series, FitnessProgress, Measurement, BODY_SERIES, METRIC_SERIES,
};
use crate::errors::errors::AppError;
use crate::repositories::fitness::progress_repo::ProgressRepository;
use crate::repositories::fitness::profile_repo::parse_user_id;

/// Minimum weekly workouts before the frequency recommendation stops
/// firing.
const MIN_WEEKLY_WORKOUTS: usize = 3;

#[service(name = "progress")]
pub struct ProgressService {
    progress_repo: Arc<ProgressRepository>,
}

impl ProgressService {
    /// Creates the caller's progress document, optionally seeded.
    pub async fn create_progress(
        &self,
        user_id: &str,
        request: CreateProgressRequest,
    ) -> Result<FitnessProgress, AppError> {
        let owner = parse_user_id(user_id)?;

        if self.progress_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::ConflictError(
                "Fitness progress already exists for this user".to_string(),
            ));
        }

        let mut progress = FitnessProgress::new(owner);
        if let Some(body_measurements) = request.body_measurements {
            progress.body_measurements = body_measurements;
        }
        if let Some(fitness_metrics) = request.fitness_metrics {
            progress.fitness_metrics = fitness_metrics;
        }

        let created = self.progress_repo.create(progress).await?;
        info!("Created fitness progress for user {}", user_id);
        Ok(created)
    }

    pub async fn get_progress(&self, user_id: &str) -> Result<FitnessProgress, AppError> {
        require_progress(self.progress_repo.find_by_user_id(user_id).await?)
    }

    /// Replaces embedded series wholesale.
    pub async fn update_progress(
        &self,
        user_id: &str,
        request: UpdateProgressRequest,
    ) -> Result<FitnessProgress, AppError> {
        let mut progress = self.get_progress(user_id).await?;

        if let Some(body_measurements) = request.body_measurements {
            progress.body_measurements = body_measurements;
        }
        if let Some(fitness_metrics) = request.fitness_metrics {
            progress.fitness_metrics = fitness_metrics;
        }
        if let Some(progress_percentages) = request.progress_percentages {
            progress.progress_percentages = progress_percentages;
        }

        let mut update_doc = Document::new();
        update_doc.insert(
            "body_measurements",
            to_bson(&progress.body_measurements)
                .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?,
        );
        update_doc.insert(
            "fitness_metrics",
            to_bson(&progress.fitness_metrics)
                .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?,
        );
        update_doc.insert(
            "progress_percentages",
            to_bson(&progress.progress_percentages)
                .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?,
        );

        self.progress_repo
            .update(user_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Fitness progress not found".to_string()))
    }

    pub async fn delete_progress(&self, user_id: &str) -> Result<(), AppError> {
        if !self.progress_repo.delete(user_id).await? {
            return Err(AppError::NotFound("Fitness progress not found".to_string()));
        }
        Ok(())
    }

    /// Records a body measurement, timestamped server-side.
    pub async fn add_measurement(
        &self,
        user_id: &str,
        request: AddMeasurementRequest,
    ) -> Result<FitnessProgress, AppError> {
        if !is_body_series(&request.r#type) {
            return Err(AppError::ValidationError(format!(
                "Unknown measurement type '{}'. Valid types: {}",
                request.r#type,
                BODY_SERIES.join(", ")
            )));
        }
        self.record(user_id, "body_measurements", request).await
    }

    /// Records a fitness metric, timestamped server-side.
    pub async fn add_metric(
        &self,
        user_id: &str,
        request: AddMeasurementRequest,
    ) -> Result<FitnessProgress, AppError> {
        if !is_metric_series(&request.r#type) {
            return Err(AppError::ValidationError(format!(
                "Unknown metric type '{}'. Valid types: {}",
                request.r#type,
                METRIC_SERIES.join(", ")
            )));
        }
        self.record(user_id, "fitness_metrics", request).await
    }

    async fn record(
        &self,
        user_id: &str,
        category: &str,
        request: AddMeasurementRequest,
    ) -> Result<FitnessProgress, AppError> {
        let measurement = Measurement {
            value: request.value,
            date: DateTime::now(),
            notes: request.notes,
        };
        let path = format!("{}.{}", category, request.r#type);

        require_progress(
            self.progress_repo
                .push_measurement(user_id, &path, &measurement)
                .await?,
        )
    }

    /// Entries of one series inside `[start_date, end_date]`, newest
    /// first.
    pub async fn get_history(
        &self,
        user_id: &str,
        query: HistoryQuery,
    ) -> Result<HistoryResponse, AppError> {
        let progress = self.get_progress(user_id).await?;
        let series = progress.series(&query.r#type).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown series '{}'", query.r#type))
        })?;

        let start = query.start_date.timestamp_millis();
        let end = query
            .end_date
            .map(|d| d.timestamp_millis())
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let measurements = series
            .iter()
            .filter(|m| {
                let ts = m.date.timestamp_millis();
                ts >= start && ts <= end
            })
            .cloned()
            .collect();

        Ok(HistoryResponse {
            r#type: query.r#type,
            measurements,
        })
    }

    /// Change over a `week|month|year` window for one series.
    pub async fn calculate_progress(
        &self,
        user_id: &str,
        query: ProgressQuery,
    ) -> Result<ProgressResponse, AppError> {
        let category = if is_body_series(&query.r#type) {
            "body_measurements"
        } else if is_metric_series(&query.r#type) {
            "fitness_metrics"
        } else {
            return Err(AppError::ValidationError(format!(
                "Unknown series '{}'",
                query.r#type
            )));
        };

        let window = match query.period {
            ProgressPeriod::Week => Duration::days(7),
            ProgressPeriod::Month => Duration::days(30),
            ProgressPeriod::Year => Duration::days(365),
        };
        let start = Utc::now() - window;
        let path = format!("{}.{}", category, query.r#type);

        let values = self
            .progress_repo
            .series_values_since(user_id, &path, DateTime::from_millis(start.timestamp_millis()))
            .await?;

        Ok(progress_from_values(&values))
    }

    /// Personal bests, per-metric averages and the distinct-workout-day
    /// count.
    pub async fn get_stats(&self, user_id: &str) -> Result<ProgressStatsResponse, AppError> {
        let progress = self.get_progress(user_id).await?;
        let (personal_bests, average_metrics) = self.progress_repo.metric_stats(user_id).await?;

        Ok(ProgressStatsResponse {
            total_workouts: progress.count_workout_days() as u64,
            average_metrics,
            personal_bests,
        })
    }

    pub async fn analyze_trends(&self, user_id: &str) -> Result<TrendAnalysisResponse, AppError> {
        let progress = self.get_progress(user_id).await?;
        Ok(analyze(&progress))
    }
}

/// Measurements can only be recorded against an existing progress
/// document; a missing one is the caller's 404, never an implicit
/// create.
fn require_progress(found: Option<FitnessProgress>) -> Result<FitnessProgress, AppError> {
    found.ok_or_else(|| AppError::NotFound("Fitness progress not found".to_string()))
}

/// Change, percent change and direction from an oldest-first window.
fn progress_from_values(values: &[f64]) -> ProgressResponse {
    if values.len() < 2 {
        return ProgressResponse {
            change: 0.0,
            change_percentage: 0.0,
            trend: Trend::Stable,
        };
    }

    let first = values[0];
    let last = values[values.len() - 1];
    let change = last - first;
    let change_percentage = if first != 0.0 { change / first * 100.0 } else { 0.0 };
    let trend = if change > 0.0 {
        Trend::Up
    } else if change < 0.0 {
        Trend::Down
    } else {
        Trend::Stable
    };

    ProgressResponse {
        change,
        change_percentage,
        trend,
    }
}

/// Percent change between the newest and oldest entry of a
/// newest-first series, when it has at least two points.
fn series_change_percentage(series: &[Measurement]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let latest = series[0].value;
    let oldest = series[series.len() - 1].value;
    if oldest == 0.0 {
        return None;
    }
    Some((latest - oldest) / oldest * 100.0)
}

/// Classifies every series with enough history into improvements and
/// areas to focus on, then derives recommendations.
fn analyze(progress: &FitnessProgress) -> TrendAnalysisResponse {
    let mut improvements = Vec::new();
    let mut areas_to_focus = Vec::new();

    // Lower is better for weight and body fat
    for name in ["weight", "body_fat"] {
        if let Some(series) = progress.body_measurements.series(name) {
            if let Some(change) = series_change_percentage(series) {
                if change < 0.0 {
                    improvements.push(format!("{} reduced by {:.1}%", name, change.abs()));
                } else if change > 5.0 {
                    areas_to_focus.push(format!("{} increased by {:.1}%", name, change));
                }
            }
        }
    }

    // Higher is better for performance metrics
    for name in METRIC_SERIES {
        if let Some(series) = progress.fitness_metrics.series(name) {
            if let Some(change) = series_change_percentage(series) {
                if change > 10.0 {
                    improvements.push(format!("{} improved by {:.1}%", name, change));
                } else if change < 0.0 {
                    areas_to_focus.push(format!("{} decreased by {:.1}%", name, change.abs()));
                }
            }
        }
    }

    let mut recommendations = Vec::new();
    if progress.count_workout_days() < MIN_WEEKLY_WORKOUTS {
        recommendations.push(
            "Try to increase workout frequency to at least 3 times per week".to_string(),
        );
    }
    if areas_to_focus.len() > improvements.len() {
        recommendations
            .push("Consider reviewing your workout routine and nutrition plan".to_string());
    }
    if improvements.is_empty() {
        recommendations
            .push("Start tracking more metrics to better monitor your progress".to_string());
    }

    TrendAnalysisResponse {
        improvements,
        areas_to_focus,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn measurement(value: f64, millis: i64) -> Measurement {
        Measurement {
            value,
            date: DateTime::from_millis(millis),
            notes: None,
        }
    }

    #[test]
    fn recording_against_missing_document_is_not_found() {
        let err = require_progress(None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Not found: Fitness progress not found");

        let existing = FitnessProgress::new(ObjectId::new());
        assert!(require_progress(Some(existing)).is_ok());
    }

    #[test]
    fn progress_needs_two_points() {
        let result = progress_from_values(&[70.0]);
        assert_eq!(result.change, 0.0);
        assert_eq!(result.change_percentage, 0.0);
        assert_eq!(result.trend, Trend::Stable);
    }

    #[test]
    fn progress_computes_change_and_trend() {
        let result = progress_from_values(&[80.0, 78.0, 76.0]);
        assert_eq!(result.change, -4.0);
        assert!((result.change_percentage + 5.0).abs() < 0.01);
        assert_eq!(result.trend, Trend::Down);

        let result = progress_from_values(&[10.0, 12.0]);
        assert_eq!(result.trend, Trend::Up);
        assert!((result.change_percentage - 20.0).abs() < 0.01);
    }

    #[test]
    fn progress_guards_zero_baseline() {
        let result = progress_from_values(&[0.0, 5.0]);
        assert_eq!(result.change, 5.0);
        assert_eq!(result.change_percentage, 0.0);
    }

    #[test]
    fn weight_loss_counts_as_improvement() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        // newest first: dropped from 80 to 76
        progress.body_measurements.weight =
            vec![measurement(76.0, 2_000_000), measurement(80.0, 0)];

        let analysis = analyze(&progress);
        assert_eq!(analysis.improvements.len(), 1);
        assert!(analysis.improvements[0].starts_with("weight reduced by 5.0%"));
    }

    #[test]
    fn weight_gain_over_threshold_is_flagged() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        progress.body_measurements.weight =
            vec![measurement(90.0, 2_000_000), measurement(80.0, 0)];

        let analysis = analyze(&progress);
        assert!(analysis.improvements.is_empty());
        assert_eq!(analysis.areas_to_focus.len(), 1);
        assert!(analysis.areas_to_focus[0].contains("increased by 12.5%"));
    }

    #[test]
    fn metric_gains_and_losses_classified() {
        let mut progress = FitnessProgress::new(ObjectId::new());
        // push ups up 50%, squats down 10%
        progress.fitness_metrics.push_ups =
            vec![measurement(30.0, 2_000_000), measurement(20.0, 0)];
        progress.fitness_metrics.squats =
            vec![measurement(27.0, 2_000_000), measurement(30.0, 0)];

        let analysis = analyze(&progress);
        assert!(analysis
            .improvements
            .iter()
            .any(|s| s.starts_with("push_ups improved by 50.0%")));
        assert!(analysis
            .areas_to_focus
            .iter()
            .any(|s| s.starts_with("squats decreased by 10.0%")));
    }

    #[test]
    fn empty_history_recommends_tracking() {
        let progress = FitnessProgress::new(ObjectId::new());
        let analysis = analyze(&progress);

        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r == "Try to increase workout frequency to at least 3 times per week"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r == "Start tracking more metrics to better monitor your progress"));
    }
}
