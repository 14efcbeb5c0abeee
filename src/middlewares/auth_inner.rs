//! Core authentication logic behind [`AuthMiddleware`].
//!
//! [`AuthMiddleware`]: crate::middlewares::auth_middleware::AuthMiddleware

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::authentication_request::{
    AuthMode, RequiredPermissions, RequiredRole,
};
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
    pub required_permissions: Option<RequiredPermissions>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();
        let required_permissions = self.required_permissions.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();
            let auth_result = authenticate_request(&req, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("Authentication failed: {}", err);
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_required",
                        "message": "A valid authentication token is required"
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (AuthMode::Required, Ok(user)) => {
                    let role_ok = required_role
                        .as_ref()
                        .is_none_or(|required| required.is_satisfied(&user.role));
                    let permissions_ok = required_permissions
                        .as_ref()
                        .is_none_or(|required| required.is_satisfied(&user.permissions));

                    if !role_ok || !permissions_ok {
                        log::warn!(
                            "Insufficient permissions: user {} (role {})",
                            user.user_id,
                            user.role
                        );
                        let response = HttpResponse::Forbidden().json(serde_json::json!({
                            "error": "insufficient_permissions",
                            "message": "You do not have access to this resource"
                        }));
                        let (req, _) = req.into_parts();
                        return Ok(ServiceResponse::new(req, response).map_into_right_body());
                    }

                    log::debug!("Authenticated user {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    log::debug!("Optional authentication succeeded for {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("Optional authentication: no valid token, proceeding");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Verifies the bearer token on a request and builds the
/// authenticated user from its claims.
fn authenticate_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing Authorization header".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
        permissions: claims.permissions,
    })
}
