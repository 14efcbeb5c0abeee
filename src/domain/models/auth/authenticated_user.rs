use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::UserPermission;
use crate::errors::errors::AppError;

/// Caller identity extracted from a verified JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User document id (hex)
    pub user_id: String,

    /// User email
    pub email: String,

    /// Assigned role
    pub role: String,

    /// Granted permissions (wire form, e.g. "manage:users")
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    /// Checks for an exact role.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Checks for any of the given roles (OR).
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    /// Checks for a single permission.
    pub fn has_permission(&self, permission: UserPermission) -> bool {
        self.permissions.iter().any(|p| p == permission.as_str())
    }

    /// Checks that every listed permission is granted (AND).
    pub fn has_all_permissions(&self, permissions: &[UserPermission]) -> bool {
        permissions.iter().all(|p| self.has_permission(*p))
    }

    pub fn is_admin(&self) -> bool {
        self.has_any_role(&["admin", "super_admin"])
    }

    /// Fails with `AuthorizationError` unless the permission is granted.
    pub fn require_permission(&self, permission: UserPermission) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError(format!(
                "Missing required permission: {}",
                permission.as_str()
            )))
        }
    }
}

/// ActixWeb FromRequest implementation
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "Unauthenticated request"
            ))),
        }
    }
}

/// Extractor that yields `None` instead of failing when the request
/// is anonymous.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: &str, permissions: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "507f1f77bcf86cd799439011".to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_role_checks() {
        let user = user_with("trainer", &["manage:workouts"]);
        assert!(user.has_role("trainer"));
        assert!(!user.has_role("admin"));
        assert!(user.has_any_role(&["admin", "trainer"]));
        assert!(!user.has_any_role(&["admin", "super_admin"]));
        assert!(!user.is_admin());

        assert!(user_with("super_admin", &[]).is_admin());
    }

    #[test]
    fn test_permission_checks() {
        let user = user_with("admin", &["manage:users", "manage:trainers"]);
        assert!(user.has_permission(UserPermission::ManageUsers));
        assert!(!user.has_permission(UserPermission::SystemSettings));

        assert!(user.has_all_permissions(&[
            UserPermission::ManageUsers,
            UserPermission::ManageTrainers,
        ]));
        assert!(!user.has_all_permissions(&[
            UserPermission::ManageUsers,
            UserPermission::SystemSettings,
        ]));
        // Empty requirement is trivially satisfied
        assert!(user.has_all_permissions(&[]));
    }

    #[test]
    fn test_require_permission() {
        let user = user_with("trainer", &["manage:workouts"]);
        assert!(user.require_permission(UserPermission::ManageWorkouts).is_ok());

        let err = user.require_permission(UserPermission::ManageUsers).unwrap_err();
        assert!(err.to_string().contains("manage:users"));
    }

    #[actix_web::test]
    async fn test_extractors_read_request_extensions() {
        use actix_web::test::TestRequest;

        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(user_with("user", &[]));

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.role, "user");

        let optional = OptionalUser::extract(&req).await.unwrap();
        assert!(optional.0.is_some());

        let anonymous = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&anonymous).await.is_err());
        let optional = OptionalUser::extract(&anonymous).await.unwrap();
        assert!(optional.0.is_none());
    }
}
