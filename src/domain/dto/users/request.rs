//! User request DTOs.
//!
//! Input structures for registration, login, token refresh and
//! admin-side account management, with declarative validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::users::user::UserRole;
use crate::utils::string_utils::deserialize_optional_string;

/// Self-service signup request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    /// Plaintext password, hashed server-side
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// Must match `password`
    pub password_confirm: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Credential login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token renewal request.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Admin-driven account creation. The target role is determined by
/// the endpoint (`/trainers`, `/admins`), not by the payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Query parameters of the user listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Partial account update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,

    /// New password, re-hashed server-side
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Verifies that password and confirmation match.
fn validate_passwords_match(req: &RegisterRequest) -> Result<(), ValidationError> {
    if req.password != req.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("Passwords do not match".into()));
    }
    Ok(())
}

/// Password strength rule: upper + lower + digit + special character.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_uppercase && has_lowercase && has_digit && has_special) {
        return Err(ValidationError::new("weak_password").with_message(
            "Password must contain uppercase, lowercase, digit and special characters".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "Str0ng!Pass".to_string(),
            password_confirm: "Str0ng!Pass".to_string(),
            phone_number: None,
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_register_rejects_invalid_email() {
        let mut req = valid_register();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_password_mismatch() {
        let mut req = valid_register();
        req.password_confirm = "Different1!".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Passwords do not match"));
    }

    #[test]
    fn test_register_rejects_weak_passwords() {
        for weak in ["alllowercase1!", "ALLUPPERCASE1!", "NoDigits!!", "NoSpecial123A", "Sh0r!t"] {
            let mut req = valid_register();
            req.password = weak.to_string();
            req.password_confirm = weak.to_string();
            assert!(req.validate().is_err(), "expected rejection for {weak:?}");
        }
    }

    #[test]
    fn test_update_request_allows_empty_payload() {
        let req = UpdateUserRequest::default();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_validates_present_fields() {
        let req = UpdateUserRequest {
            password: Some("weak".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
