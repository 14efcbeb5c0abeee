//! Fitness profile HTTP handlers.
//!
//! Every route operates on the caller's own profile except search,
//! nearby and stats.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::fitness::profile::{
    CreateProfileRequest, NearbyQuery, ProfileSearchQuery, UpdateProfileRequest,
};
use crate::domain::entities::users::user::UserPermission;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::fitness::profile_service::ProfileService;

/// `POST /api/v1/profiles`
#[post("")]
pub async fn create_profile(
    user: AuthenticatedUser,
    payload: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profile = ProfileService::instance()
        .create_profile(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// `GET /api/v1/profiles`
#[get("")]
pub async fn get_my_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::instance().get_profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// `PUT /api/v1/profiles`
#[put("")]
pub async fn update_my_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profile = ProfileService::instance()
        .update_profile(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// `DELETE /api/v1/profiles`
#[delete("")]
pub async fn delete_my_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    ProfileService::instance().delete_profile(&user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/v1/profiles/nearby?longitude=&latitude=&max_distance=`
#[get("/nearby")]
pub async fn nearby(
    user: AuthenticatedUser,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profiles = ProfileService::instance()
        .find_nearby(&user.user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profiles))
}

/// `GET /api/v1/profiles/search`
#[get("/search")]
pub async fn search(
    _user: AuthenticatedUser,
    query: web::Query<ProfileSearchQuery>,
) -> Result<HttpResponse, AppError> {
    let result = ProfileService::instance().search(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/profiles/completion`
#[get("/completion")]
pub async fn completion(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let result = ProfileService::instance().get_completion(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/profiles/stats`
#[get("/stats")]
pub async fn stats(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ViewAnalytics)?;
    let result = ProfileService::instance().get_stats().await?;
    Ok(HttpResponse::Ok().json(result))
}
