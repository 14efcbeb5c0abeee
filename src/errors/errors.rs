//! Application wide error types
//!
//! A single `thiserror` derived enum covers every failure the service can
//! produce. The `actix_web::ResponseError` impl maps each variant to an HTTP
//! status so handlers can return `Result<HttpResponse, AppError>` directly.
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn create_profile(data: CreateProfileRequest) -> Result<Profile, AppError> {
//!     if data.fitness_goals.is_empty() {
//!         return Err(AppError::ValidationError("At least one goal is required".to_string()));
//!     }
//!
//!     let profile = profile_repo.create(data).await
//!         .map_err(|e| AppError::DatabaseError(e.to_string()))?;
//!
//!     Ok(profile)
//! }
//! ```

use thiserror::Error;

/// Application error type covering all layers of the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB failure (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Request validation failure (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing resource (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate or conflicting resource (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// Failed authentication (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Missing permission (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Internal failure (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Profile not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("Email already in use".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Insufficient permissions".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
