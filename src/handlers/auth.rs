//! Authentication HTTP handlers.
//!
//! Registration, login, token refresh and the current-user lookup.
//! Register and login are public; profile and refresh authenticate
//! the caller from the bearer token themselves.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::domain::dto::users::response::LoginResponse;
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::users::user_service::UserService;

/// `POST /api/v1/auth/register`: creates the account and signs the
/// caller in immediately with a full token set.
#[post("/register")]
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance().register(payload.into_inner()).await?;

    log::info!("User registered: {}", user.email);

    let token_pair = TokenService::instance().generate_token_pair(&user)?;
    let response = LoginResponse::with_refresh_token(
        user,
        token_pair.access_token,
        token_pair.expires_in,
        token_pair.refresh_token.unwrap_or_default(),
    );

    Ok(HttpResponse::Created().json(response))
}

/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance()
        .authenticate(&payload.email, &payload.password)
        .await?;

    log::info!("User logged in: {}", user.email);

    let token_pair = TokenService::instance().generate_token_pair(&user)?;
    let response = LoginResponse::with_refresh_token(
        user,
        token_pair.access_token,
        token_pair.expires_in,
        token_pair.refresh_token.unwrap_or_default(),
    );

    Ok(HttpResponse::Ok().json(response))
}

/// `GET /api/v1/auth/profile`: the account behind the bearer token.
#[get("/profile")]
pub async fn profile(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing Authorization header".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    let user = UserService::instance().get_user_by_id(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// `POST /api/v1/auth/refresh`: re-issues a token pair from the
/// account's current role and permissions.
#[post("/refresh")]
pub async fn refresh(payload: web::Json<RefreshTokenRequest>) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_service = TokenService::instance();
    let claims = token_service.verify_token(&payload.refresh_token)?;

    let user = UserService::instance().get_user_entity(&claims.sub).await?;
    if !user.can_login() {
        return Err(AppError::AuthenticationError("Account is disabled".to_string()));
    }

    let token_pair = token_service.generate_token_pair(&user)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": token_pair.access_token,
        "refresh_token": token_pair.refresh_token,
        "expires_in": token_pair.expires_in,
        "token_type": "Bearer"
    })))
}
