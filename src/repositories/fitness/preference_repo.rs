//! Workout preference repository.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::fitness::preference::{WorkoutPreference, WorkoutType};
use crate::errors::errors::AppError;
use crate::repositories::fitness::profile_repo::{bson_f64, bson_i64, parse_user_id};

const PREFERENCE_CACHE_TTL: usize = 600;

#[repository(name = "preference", collection = "workout_preferences")]
pub struct PreferenceRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl PreferenceRepository {
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Option<WorkoutPreference>, AppError> {
        let owner = parse_user_id(user_id)?;

        let cache_key = self.cache_key(user_id);
        if let Ok(Some(cached)) = self.redis.get::<WorkoutPreference>(&cache_key).await {
            return Ok(Some(cached));
        }

        let preference = self
            .collection::<WorkoutPreference>()
            .find_one(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref found) = preference {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, found, PREFERENCE_CACHE_TTL)
                .await;
        }

        Ok(preference)
    }

    pub async fn create(
        &self,
        mut preference: WorkoutPreference,
    ) -> Result<WorkoutPreference, AppError> {
        if self
            .find_by_user_id(&preference.user_id.to_hex())
            .await?
            .is_some()
        {
            return Err(AppError::ConflictError(
                "Workout preferences already exist for this user".to_string(),
            ));
        }

        let result = self
            .collection::<WorkoutPreference>()
            .insert_one(&preference)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        preference.id = result.inserted_id.as_object_id();
        self.invalidate_collection_cache(None).await;
        Ok(preference)
    }

    pub async fn update(
        &self,
        user_id: &str,
        mut update_doc: Document,
    ) -> Result<Option<WorkoutPreference>, AppError> {
        let owner = parse_user_id(user_id)?;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<WorkoutPreference>()
            .find_one_and_update(doc! { "user_id": owner }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if updated.is_some() {
            self.invalidate_cache(user_id).await;
        }

        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str) -> Result<bool, AppError> {
        let owner = parse_user_id(user_id)?;
        let result = self
            .collection::<WorkoutPreference>()
            .delete_one(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.deleted_count > 0 {
            self.invalidate_cache(user_id).await;
            self.invalidate_collection_cache(None).await;
            return Ok(true);
        }

        Ok(false)
    }

    /// Candidate pool for partner matching: everyone whose preferred
    /// types include the given one.
    pub async fn find_by_workout_type(
        &self,
        workout_type: WorkoutType,
    ) -> Result<Vec<WorkoutPreference>, AppError> {
        let cursor = self
            .collection::<WorkoutPreference>()
            .find(doc! { "preferred_workout_types": workout_type.as_str() })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Counts how many users prefer each workout type.
    pub async fn workout_type_distribution(&self) -> Result<HashMap<String, i64>, AppError> {
        let pipeline = vec![
            doc! { "$unwind": "$preferred_workout_types" },
            doc! { "$group": { "_id": "$preferred_workout_types", "count": { "$sum": 1 } } },
        ];

        let mut cursor = self
            .collection::<WorkoutPreference>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut counts = HashMap::new();
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            if let Ok(key) = row.get_str("_id") {
                counts.insert(
                    key.to_string(),
                    row.get("count").and_then(bson_i64).unwrap_or(0),
                );
            }
        }

        Ok(counts)
    }

    /// Mean of each intensity dial across all users: (cardio,
    /// strength, flexibility).
    pub async fn average_intensities(&self) -> Result<(f64, f64, f64), AppError> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": null,
                "cardio": { "$avg": "$intensity_preference.cardio_intensity" },
                "strength": { "$avg": "$intensity_preference.strength_intensity" },
                "flexibility": { "$avg": "$intensity_preference.flexibility_intensity" },
            }
        }];

        let mut cursor = self
            .collection::<WorkoutPreference>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            return Ok((
                row.get("cardio").and_then(bson_f64).unwrap_or(0.0),
                row.get("strength").and_then(bson_f64).unwrap_or(0.0),
                row.get("flexibility").and_then(bson_f64).unwrap_or(0.0),
            ));
        }

        Ok((0.0, 0.0, 0.0))
    }

    /// The five most popular time slots with their user counts,
    /// most popular first.
    pub async fn popular_time_slots(&self) -> Result<Vec<(String, i64)>, AppError> {
        let pipeline = vec![
            doc! { "$group": {
                "_id": "$time_preference.preferred_time_slot",
                "count": { "$sum": 1 }
            }},
            doc! { "$sort": { "count": -1 } },
            doc! { "$limit": 5 },
        ];

        let mut cursor = self
            .collection::<WorkoutPreference>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut slots = Vec::new();
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            if let Ok(slot) = row.get_str("_id") {
                slots.push((
                    slot.to_string(),
                    row.get("count").and_then(bson_i64).unwrap_or(0),
                ));
            }
        }

        Ok(slots)
    }

    /// Group-vs-individual split: (group count, individual count).
    pub async fn group_preference_counts(&self) -> Result<(i64, i64), AppError> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$prefer_group_workouts", "count": { "$sum": 1 } }
        }];

        let mut cursor = self
            .collection::<WorkoutPreference>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut group = 0;
        let mut individual = 0;
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            let count = row.get("count").and_then(bson_i64).unwrap_or(0);
            match row.get_bool("_id") {
                Ok(true) => group = count,
                Ok(false) => individual = count,
                Err(_) => {}
            }
        }

        Ok((group, individual))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("user_id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "preferred_workout_types": 1 })
                .options(
                    IndexOptions::builder()
                        .name("workout_types_idx".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection::<WorkoutPreference>()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("Preference indexes ensured");
        Ok(())
    }
}
