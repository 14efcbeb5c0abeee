//! User account business logic.
//!
//! Registration, authentication and account administration on top of
//! [`UserRepository`]. Passwords are hashed with bcrypt at an
//! environment-scaled cost, and authentication failures collapse into
//! one uniform error so callers cannot probe which emails exist.

use std::sync::Arc;

use bcrypt::{hash, verify};
use log::{info, warn};
use mongodb::bson::Document;
use singleton_macro::service;

use crate::config::{PasswordConfig, SeedConfig};
use crate::domain::dto::users::request::{ListUsersQuery, RegisterRequest, UpdateUserRequest};
use crate::domain::dto::users::response::{CreateUserResponse, UserResponse};
use crate::domain::entities::users::user::{User, UserPermission, UserRole};
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Registers a self-service account with the base `user` role.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - email already registered
    /// * `AppError::InternalError` - password hashing failed
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        self.build_user(
            request.first_name,
            request.last_name,
            request.email,
            &request.password,
            request.phone_number,
            UserRole::User,
        )
        .await
    }

    /// Creates an account with an elevated role. The caller is
    /// responsible for permission checks; this only enforces the
    /// role's default permission set.
    pub async fn create_with_role(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password: &str,
        phone_number: Option<String>,
        role: UserRole,
    ) -> Result<CreateUserResponse, AppError> {
        let user = self
            .build_user(first_name, last_name, email, password, phone_number, role)
            .await?;

        Ok(CreateUserResponse {
            user: UserResponse::from(user),
            message: format!("{} account created successfully", role),
        })
    }

    async fn build_user(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password: &str,
        phone_number: Option<String>,
        role: UserRole,
    ) -> Result<User, AppError> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let mut user = User::new(first_name, last_name, email, password_hash, role);
        user.phone_number = phone_number;

        self.user_repo.create(user).await
    }

    /// Verifies credentials and returns the account.
    ///
    /// Unknown email, wrong password and disabled account all map to
    /// the same `AuthenticationError`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let matches = verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

        if !matches {
            warn!("Failed login attempt for {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.can_login() {
            warn!("Login attempt on disabled account {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if let Some(id) = user.id_string() {
            self.user_repo.touch_last_login(&id).await;
        }

        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Fetches the full entity, used where a fresh token must be
    /// issued from current role and permissions.
    pub async fn get_user_entity(&self, id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Applies a partial update. A role change resets permissions to
    /// the new role's defaults, and a new password is re-hashed.
    pub async fn update_user(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let mut update_doc = Document::new();

        if let Some(first_name) = request.first_name {
            update_doc.insert("first_name", first_name);
        }
        if let Some(last_name) = request.last_name {
            update_doc.insert("last_name", last_name);
        }
        if let Some(email) = request.email {
            let email = email.to_lowercase();
            if let Some(existing) = self.user_repo.find_by_email(&email).await? {
                if existing.id_string().as_deref() != Some(id) {
                    return Err(AppError::ConflictError(format!(
                        "Email already registered: {}",
                        email
                    )));
                }
            }
            update_doc.insert("email", email);
        }
        if let Some(password) = request.password {
            let password_hash = hash(&password, PasswordConfig::bcrypt_cost())
                .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;
            update_doc.insert("password_hash", password_hash);
        }
        if let Some(phone_number) = request.phone_number {
            update_doc.insert("phone_number", phone_number);
        }
        if let Some(profile_picture) = request.profile_picture {
            update_doc.insert("profile_picture", profile_picture);
        }
        if let Some(role) = request.role {
            update_doc.insert("role", role.as_str());
            let permissions: Vec<&str> = role
                .default_permissions()
                .iter()
                .map(UserPermission::as_str)
                .collect();
            update_doc.insert("permissions", permissions);
        }
        if let Some(is_active) = request.is_active {
            update_doc.insert("is_active", is_active);
        }

        if update_doc.is_empty() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        let updated = self
            .user_repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(updated))
    }

    /// Soft-deletes an account.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        if !self.user_repo.soft_delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Lists accounts, optionally filtered by role and active flag.
    pub async fn list_users(&self, query: ListUsersQuery) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all(users_filter(&query)).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_by_role(role.as_str()).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Seeds a super admin account on first boot when the seed
    /// credentials are configured. Skips silently if the email is
    /// already taken.
    pub async fn seed_super_admin(&self) -> Result<(), AppError> {
        let (email, password) = match (SeedConfig::admin_email(), SeedConfig::admin_password()) {
            (Some(email), Some(password)) => (email, password),
            _ => return Ok(()),
        };

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let password_hash = hash(&password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

        let user = User::new(
            "System".to_string(),
            "Administrator".to_string(),
            email.clone(),
            password_hash,
            UserRole::SuperAdmin,
        );

        self.user_repo.create(user).await?;
        info!("Seeded super admin account: {}", email);
        Ok(())
    }
}

/// Builds the Mongo filter for the user listing.
fn users_filter(query: &ListUsersQuery) -> Document {
    let mut filter = Document::new();
    if let Some(role) = query.role {
        filter.insert("role", role.as_str());
    }
    if let Some(is_active) = query.is_active {
        filter.insert("is_active", is_active);
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_filter_threads_role_and_active_flag() {
        let filter = users_filter(&ListUsersQuery {
            role: Some(UserRole::Trainer),
            is_active: Some(true),
        });
        assert_eq!(filter.get_str("role").unwrap(), "trainer");
        assert!(filter.get_bool("is_active").unwrap());

        assert!(users_filter(&ListUsersQuery::default()).is_empty());
    }
}
