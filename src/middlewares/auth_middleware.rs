//! JWT authentication middleware.
//!
//! Validates bearer tokens in the request pipeline and stores the
//! authenticated user in request extensions for extractors and
//! handlers downstream.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::authentication_request::{
    AuthMode, RequiredPermissions, RequiredRole,
};
use crate::domain::entities::users::user::UserPermission;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT authentication middleware factory.
pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
    required_permissions: Option<RequiredPermissions>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            required_permissions: None,
        }
    }

    /// Authentication is mandatory; missing or invalid tokens get 401.
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// Authentication is attempted but the request proceeds either way.
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// Requires a specific role on top of authentication.
    pub fn required_with_role(role: &str) -> Self {
        let mut middleware = Self::new(AuthMode::Required);
        middleware.required_role = Some(RequiredRole::Single(role.to_string()));
        middleware
    }

    /// Requires any one of the given roles.
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        let mut middleware = Self::new(AuthMode::Required);
        middleware.required_role =
            Some(RequiredRole::Any(roles.into_iter().map(String::from).collect()));
        middleware
    }

    /// Requires every listed permission on top of authentication.
    pub fn required_with_permissions(permissions: Vec<UserPermission>) -> Self {
        let mut middleware = Self::new(AuthMode::Required);
        middleware.required_permissions = Some(RequiredPermissions(permissions));
        middleware
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
            required_permissions: self.required_permissions.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single("admin".to_string());
        assert!(required.is_satisfied("admin"));
        assert!(!required.is_satisfied("user"));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec!["admin".to_string(), "trainer".to_string()]);
        assert!(required.is_satisfied("admin"));
        assert!(required.is_satisfied("trainer"));
        assert!(!required.is_satisfied("user"));
    }

    #[test]
    fn test_required_permissions_all_of() {
        let required = RequiredPermissions(vec![
            UserPermission::ManageUsers,
            UserPermission::ViewAnalytics,
        ]);
        let full = vec!["manage:users".to_string(), "view:analytics".to_string()];
        let partial = vec!["manage:users".to_string()];

        assert!(required.is_satisfied(&full));
        assert!(!required.is_satisfied(&partial));
    }

    #[test]
    fn test_constructor_configurations() {
        let required = AuthMiddleware::required();
        assert_eq!(required.mode, AuthMode::Required);
        assert!(required.required_role.is_none());
        assert!(required.required_permissions.is_none());

        let optional = AuthMiddleware::optional();
        assert_eq!(optional.mode, AuthMode::Optional);

        let with_role = AuthMiddleware::required_with_role("trainer");
        assert!(matches!(with_role.required_role, Some(RequiredRole::Single(ref r)) if r == "trainer"));

        let with_roles = AuthMiddleware::required_with_roles(vec!["admin", "super_admin"]);
        assert!(matches!(with_roles.required_role, Some(RequiredRole::Any(ref r)) if r.len() == 2));

        let with_permissions =
            AuthMiddleware::required_with_permissions(vec![UserPermission::ViewAnalytics]);
        assert!(with_permissions.required_permissions.is_some());
    }

    #[test]
    fn test_authenticated_user_role_checks() {
        let user = AuthenticatedUser {
            user_id: "test_id".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            permissions: vec!["manage:users".to_string()],
        };

        assert!(user.has_role("admin"));
        assert!(!user.has_role("trainer"));
        assert!(user.has_any_role(&["admin", "super_admin"]));
        assert!(user.is_admin());
    }
}
