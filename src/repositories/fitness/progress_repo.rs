//! Fitness progress repository.
//!
//! One document per user holding every measurement series. New
//! measurements are pushed to the front of their series and the series
//! is capped, so reads never page through unbounded arrays.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, to_bson, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::fitness::progress::{
    FitnessProgress, Measurement, METRIC_SERIES, SERIES_CAP,
};
use crate::errors::errors::AppError;
use crate::repositories::fitness::profile_repo::{bson_f64, parse_user_id};

const PROGRESS_CACHE_TTL: usize = 300;

#[repository(name = "progress", collection = "fitness_progress")]
pub struct ProgressRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ProgressRepository {
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<FitnessProgress>, AppError> {
        let owner = parse_user_id(user_id)?;

        let cache_key = self.cache_key(user_id);
        if let Ok(Some(cached)) = self.redis.get::<FitnessProgress>(&cache_key).await {
            return Ok(Some(cached));
        }

        let progress = self
            .collection::<FitnessProgress>()
            .find_one(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref found) = progress {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, found, PROGRESS_CACHE_TTL)
                .await;
        }

        Ok(progress)
    }

    pub async fn create(&self, mut progress: FitnessProgress) -> Result<FitnessProgress, AppError> {
        let result = self
            .collection::<FitnessProgress>()
            .insert_one(&progress)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        progress.id = result.inserted_id.as_object_id();
        Ok(progress)
    }

    /// Applies a `$set` update and returns the fresh document.
    pub async fn update(
        &self,
        user_id: &str,
        mut update_doc: Document,
    ) -> Result<Option<FitnessProgress>, AppError> {
        let owner = parse_user_id(user_id)?;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<FitnessProgress>()
            .find_one_and_update(doc! { "user_id": owner }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            self.invalidate_cache(user_id).await;
        }

        Ok(updated)
    }

    /// Prepends a measurement to the series at `path` (for example
    /// `body_measurements.weight`), keeping only the newest entries.
    /// Returns `None` when no progress document exists for the user.
    pub async fn push_measurement(
        &self,
        user_id: &str,
        path: &str,
        measurement: &Measurement,
    ) -> Result<Option<FitnessProgress>, AppError> {
        let owner = parse_user_id(user_id)?;
        let value = to_bson(measurement)
            .map_err(|e| AppError::InternalError(format!("Serialization failed: {}", e)))?;

        let update = doc! {
            "$push": {
                path: {
                    "$each": [value],
                    "$position": 0,
                    "$slice": SERIES_CAP,
                }
            },
            "$set": { "updated_at": DateTime::now() },
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<FitnessProgress>()
            .find_one_and_update(doc! { "user_id": owner }, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate_cache(user_id).await;
        Ok(updated)
    }

    /// Pulls the values of one series between `start` and now, oldest
    /// first, via an unwind pipeline so only the window leaves Mongo.
    pub async fn series_values_since(
        &self,
        user_id: &str,
        path: &str,
        start: DateTime,
    ) -> Result<Vec<f64>, AppError> {
        let owner = parse_user_id(user_id)?;
        let series_ref = format!("${}", path);
        let date_field = format!("{}.date", path);
        let value_ref = format!("${}.value", path);
        let date_ref = format!("${}.date", path);

        let pipeline = vec![
            doc! { "$match": { "user_id": owner } },
            doc! { "$unwind": series_ref },
            doc! { "$match": { date_field: { "$gte": start, "$lte": DateTime::now() } } },
            doc! { "$project": { "value": value_ref, "date": date_ref } },
            doc! { "$sort": { "date": 1 } },
        ];

        let mut cursor = self
            .collection::<FitnessProgress>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut values = Vec::new();
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            if let Some(v) = row.get("value").and_then(bson_f64) {
                values.push(v);
            }
        }

        Ok(values)
    }

    /// Personal bests and averages across every fitness metric in one
    /// projection pass. Running time is a minimum, everything else a
    /// maximum.
    pub async fn metric_stats(
        &self,
        user_id: &str,
    ) -> Result<(HashMap<String, f64>, HashMap<String, f64>), AppError> {
        let owner = parse_user_id(user_id)?;
        let mut projection = Document::new();
        for series in METRIC_SERIES {
            let values_ref = format!("$fitness_metrics.{}.value", series);
            let best_op = if series == "running_time" { "$min" } else { "$max" };
            projection.insert(
                format!("best_{}", series),
                doc! { best_op: values_ref.clone() },
            );
            projection.insert(format!("avg_{}", series), doc! { "$avg": values_ref });
        }

        let pipeline = vec![
            doc! { "$match": { "user_id": owner } },
            doc! { "$project": projection },
        ];

        let mut cursor = self
            .collection::<FitnessProgress>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut bests = HashMap::new();
        let mut averages = HashMap::new();

        if let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            for series in METRIC_SERIES {
                if let Some(v) = row.get(format!("best_{}", series).as_str()).and_then(bson_f64) {
                    bests.insert(series.to_string(), v);
                }
                if let Some(v) = row.get(format!("avg_{}", series).as_str()).and_then(bson_f64) {
                    averages.insert(series.to_string(), v);
                }
            }
        }

        Ok((bests, averages))
    }

    pub async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        let owner = parse_user_id(user_id)?;
        let result = self
            .collection::<FitnessProgress>()
            .delete_one(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            self.invalidate_cache(user_id).await;
            return Ok(true);
        }

        Ok(false)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build()];

        self.collection::<FitnessProgress>()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("Progress indexes ensured");
        Ok(())
    }
}
