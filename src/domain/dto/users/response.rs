//! User response DTOs.
//!
//! Everything the API returns about accounts. Password hashes and
//! tombstone bookkeeping are never exposed.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{User, UserRole};

/// Standard user payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    /// Wire form of the granted permissions
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let permissions = user.permission_strings();
        let User {
            id,
            first_name,
            last_name,
            email,
            role,
            is_active,
            is_email_verified,
            phone_number,
            profile_picture,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name,
            last_name,
            email,
            role,
            permissions,
            is_active,
            is_email_verified,
            phone_number,
            profile_picture,
            last_login_at,
            created_at,
            updated_at,
        }
    }
}

/// Account creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Authentication response carrying a Bearer token set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    pub fn new(user: User, access_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            refresh_token: None,
        }
    }

    pub fn with_refresh_token(
        user: User,
        access_token: String,
        expires_in: i64,
        refresh_token: String,
    ) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            refresh_token: Some(refresh_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_strips_password_hash() {
        let user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "$2b$04$secret".to_string(),
            UserRole::Trainer,
        );
        let response = UserResponse::from(user);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
        assert!(json.contains("\"role\":\"trainer\""));
        assert!(json.contains("manage:workouts"));
    }

    #[test]
    fn test_registration_response_carries_full_token_set() {
        let user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        );
        let response = LoginResponse::with_refresh_token(
            user,
            "access".to_string(),
            86_400,
            "refresh".to_string(),
        );

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"user\""));
        assert!(json.contains("\"access_token\":\"access\""));
        assert!(json.contains("\"refresh_token\":\"refresh\""));
        assert!(json.contains("\"token_type\":\"Bearer\""));
        assert!(json.contains("\"expires_in\":86400"));
    }

    #[test]
    fn test_login_response_token_type() {
        let user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        );
        let response = LoginResponse::new(user, "token".to_string(), 3600);
        assert_eq!(response.token_type, "Bearer");
        assert!(response.refresh_token.is_none());
    }
}
