//! User repository.
//!
//! MongoDB-backed account storage with Redis caching on the two hot
//! lookups (by id, by email). Deletes are soft: documents are flagged
//! with `is_deleted` and every read filters them out, so an email can
//! still be pinned by its tombstone for audit purposes.

use std::sync::Arc;

use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

/// Cache TTL for individual user lookups (seconds).
const USER_CACHE_TTL: usize = 600;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(&self, email: &str) -> String {
        format!("user:email:{}", email.to_lowercase())
    }

    /// Looks up an active user by email, consulting Redis first.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = self.email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            debug!("Cache hit for email lookup: {}", email);
            return Ok(Some(cached));
        }

        let filter = doc! { "email": email.to_lowercase(), "is_deleted": false };
        let user = self
            .collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref found) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, found, USER_CACHE_TTL)
                .await;
        }

        Ok(user)
    }

    /// Looks up an active user by its hex ObjectId string.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("Invalid user ID: {}", id)))?;

        let cache_key = self.cache_key(id);
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let filter = doc! { "_id": object_id, "is_deleted": false };
        let user = self
            .collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref found) = user {
            let _ = self
                .redis
                .set_with_expiry(&cache_key, found, USER_CACHE_TTL)
                .await;
        }

        Ok(user)
    }

    /// Inserts a new user after checking the email is not taken by an
    /// active account.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        let result = self
            .collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();
        self.invalidate_collection_cache(None).await;

        info!("Created user: {} ({})", user.email, user.role.as_str());
        Ok(user)
    }

    /// Applies a `$set` update and returns the fresh document.
    pub async fn update(&self, id: &str, update_doc: Document) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("Invalid user ID: {}", id)))?;

        let mut update_doc = update_doc;
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id, "is_deleted": false },
                doc! { "$set": update_doc },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated {
            self.invalidate_cache(id).await;
            let _ = self.redis.del(&self.email_cache_key(&user.email)).await;
        }

        Ok(updated)
    }

    /// Marks a user deleted without removing the document.
    pub async fn soft_delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError(format!("Invalid user ID: {}", id)))?;

        let now = DateTime::now();
        let deleted = self
            .collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id, "is_deleted": false },
                doc! { "$set": {
                    "is_deleted": true,
                    "is_active": false,
                    "deleted_at": now,
                    "updated_at": now,
                }},
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match deleted {
            Some(user) => {
                self.invalidate_cache(id).await;
                let _ = self.redis.del(&self.email_cache_key(&user.email)).await;
                self.invalidate_collection_cache(None).await;
                info!("Soft-deleted user: {}", user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Lists active users matching an extra filter, newest first.
    pub async fn find_all(&self, mut filter: Document) -> Result<Vec<User>, AppError> {
        filter.insert("is_deleted", false);

        let cursor = self
            .collection::<User>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// Lists active users holding a given role.
    pub async fn find_by_role(&self, role: &str) -> Result<Vec<User>, AppError> {
        self.find_all(doc! { "role": role }).await
    }

    /// Records a successful login timestamp. Best effort, failures are
    /// swallowed so login itself never trips over it.
    pub async fn touch_last_login(&self, id: &str) {
        if let Ok(object_id) = ObjectId::parse_str(id) {
            let _ = self
                .collection::<User>()
                .update_one(
                    doc! { "_id": object_id },
                    doc! { "$set": { "last_login_at": DateTime::now() } },
                )
                .await;
            self.invalidate_cache(id).await;
        }
    }

    /// Creates the collection's indexes. Called once at startup.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "role": 1 })
                .options(IndexOptions::builder().name("role_idx".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("created_at_desc".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection::<User>()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        debug!("User indexes ensured");
        Ok(())
    }
}
