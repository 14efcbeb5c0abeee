//! Fitness profile repository.
//!
//! One profile document per user, keyed by the owner's id. Location
//! queries run against a 2dsphere index on `address.location`.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::fitness::profile::Profile;
use crate::errors::errors::AppError;

const PROFILE_CACHE_TTL: usize = 600;

/// Mean Earth radius in meters, used to convert distances into
/// radians for `$centerSphere`.
pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[repository(name = "profile", collection = "profiles")]
pub struct ProfileRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// Owner ids arrive as hex strings from tokens and path segments.
pub(crate) fn parse_user_id(user_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(user_id)
        .map_err(|_| AppError::ValidationError(format!("Invalid user ID: {}", user_id)))
}

impl ProfileRepository {
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let owner = parse_user_id(user_id)?;

        let cache_key = self.cache_key(user_id);
        if let Ok(Some(cached)) = self.redis.get::<Profile>(&cache_key).await {
            return Ok(Some(cached));
        }

        let profile = self
            .collection::<Profile>()
            .find_one(doc! { "user_id": owner })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref found) = profile {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, found, PROFILE_CACHE_TTL)
                .await;
        }

        Ok(profile)
    }

    pub async fn create(&self, mut profile: Profile) -> Result<Profile, AppError> {
        if self.find_by_user_id(&profile.user_id.to_hex()).await?.is_some() {
            return Err(AppError::ConflictError(
                "Profile already exists for this user".to_string(),
            ));
        }

        let result = self
            .collection::<Profile>()
            .insert_one(&profile)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        profile.id = result.inserted_id.as_object_id();
        self.invalidate_collection_cache(None).await;
        Ok(profile)
    }

    pub async fn update(
        &self,
        user_id: &str,
        mut update_doc: Document,
    ) -> Result<Option<Profile>, AppError> {
        let owner = parse_user_id(user_id)?;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<Profile>()
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
            .collection::<Profile>()
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

    /// Paginated listing filtered by an arbitrary query document.
    /// Returns the page of profiles and the total match count.
    pub async fn find_paginated(
        &self,
        filter: Document,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Profile>, u64), AppError> {
        let total = self
            .collection::<Profile>()
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let skip = page.saturating_sub(1) * limit;
        let cursor = self
            .collection::<Profile>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(skip)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let profiles = cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((profiles, total))
    }

    /// Finds profiles whose location falls within `max_distance_m`
    /// meters of a point, excluding the requesting user.
    pub async fn find_near(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance_m: f64,
        exclude_user_id: &str,
    ) -> Result<Vec<Profile>, AppError> {
        let excluded = parse_user_id(exclude_user_id)?;
        let radius_radians = max_distance_m / EARTH_RADIUS_METERS;
        let filter = doc! {
            "user_id": { "$ne": excluded },
            "address.location": {
                "$geoWithin": {
                    "$centerSphere": [[longitude, latitude], radius_radians]
                }
            }
        };

        let cursor = self
            .collection::<Profile>()
            .find(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.collection::<Profile>()
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Mean completion percentage across all profiles, 0.0 if empty.
    pub async fn average_completion(&self) -> Result<f64, AppError> {
        let pipeline = vec![doc! {
            "$group": { "_id": null, "avg": { "$avg": "$completion_percentage" } }
        }];

        let mut cursor = self
            .collection::<Profile>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            return Ok(row.get("avg").and_then(bson_f64).unwrap_or(0.0));
        }

        Ok(0.0)
    }

    /// Counts profiles per fitness level.
    pub async fn fitness_level_distribution(&self) -> Result<HashMap<String, i64>, AppError> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$fitness_level", "count": { "$sum": 1 } }
        }];
        self.count_by_group(pipeline).await
    }

    /// Counts profiles per declared goal (profiles with several goals
    /// contribute to each).
    pub async fn goal_distribution(&self) -> Result<HashMap<String, i64>, AppError> {
        let pipeline = vec![
            doc! { "$unwind": "$fitness_goals" },
            doc! { "$group": { "_id": "$fitness_goals", "count": { "$sum": 1 } } },
        ];
        self.count_by_group(pipeline).await
    }

    async fn count_by_group(
        &self,
        pipeline: Vec<Document>,
    ) -> Result<HashMap<String, i64>, AppError> {
        let mut cursor = self
            .collection::<Profile>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut counts = HashMap::new();
        while let Some(row) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
        {
            let key = match row.get_str("_id") {
                Ok(s) => s.to_string(),
                Err(_) => continue,
            };
            let count = row.get("count").and_then(bson_i64).unwrap_or(0);
            counts.insert(key, count);
        }

        Ok(counts)
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
                .keys(doc! { "address.location": "2dsphere" })
                .options(
                    IndexOptions::builder()
                        .name("location_2dsphere".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "fitness_level": 1 })
                .options(
                    IndexOptions::builder()
                        .name("fitness_level_idx".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection::<Profile>()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("Profile indexes ensured");
        Ok(())
    }
}

/// Aggregation numeric fields come back as Int32, Int64 or Double
/// depending on the stage.
pub(crate) fn bson_i64(value: &mongodb::bson::Bson) -> Option<i64> {
    use mongodb::bson::Bson;
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

pub(crate) fn bson_f64(value: &mongodb::bson::Bson) -> Option<f64> {
    use mongodb::bson::Bson;
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn bson_i64_handles_all_numeric_widths() {
        assert_eq!(bson_i64(&Bson::Int32(7)), Some(7));
        assert_eq!(bson_i64(&Bson::Int64(7)), Some(7));
        assert_eq!(bson_i64(&Bson::Double(7.9)), Some(7));
        assert_eq!(bson_i64(&Bson::Null), None);
    }

    #[test]
    fn centersphere_radius_is_in_radians() {
        let radius = 10_000.0 / EARTH_RADIUS_METERS;
        assert!(radius > 0.0015 && radius < 0.0016);
    }
}
