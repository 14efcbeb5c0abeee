//! # Domain Entities Module
//!
//! Core business entities, mapped one-to-one onto MongoDB
//! collections.
//!
//! ## Characteristics
//!
//! - **BSON serialization**: automatic conversion through `serde` and `bson`
//! - **ObjectId support**: `_id` mapping via `#[serde(rename = "_id")]`
//! - **Index definitions**: each repository creates its own indexes at init
//! - **Type safety**: enums for roles, permissions and fitness taxonomy
//!
//! ## Repository integration
//!
//! Entities are consumed by `#[repository]`-annotated structs:
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! #[repository(name = "user", collection = "users")]
//! pub struct UserRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! impl UserRepository {
//!     async fn find_by_email(&self, email: &str) -> Option<User> {
//!         self.collection::<User>()
//!             .find_one(doc! { "email": email, "is_deleted": false })
//!             .await
//!             .ok()
//!             .flatten()
//!     }
//! }
//! ```
//!
//! ## Module layout
//!
//! ```text
//! entities/
//! ├── users/        - User entity, roles and permissions
//! └── fitness/      - Profile, FitnessProgress, WorkoutPreference
//! ```
//!
//! ## Notes
//!
//! - Entities reference each other by `ObjectId`, never by embedding
//! - Measurement series are capped at 100 entries per series
//! - Document size stays far below the MongoDB 16MB limit

pub mod users;
pub mod fitness;
