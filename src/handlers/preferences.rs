//! Workout preference HTTP handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::fitness::preference::{
    CreatePreferenceRequest, MatchQuery, UpdatePreferenceRequest,
};
use crate::domain::entities::users::user::UserPermission;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::fitness::preference_service::PreferenceService;

/// `POST /api/v1/workout-preferences`
#[post("")]
pub async fn create_preferences(
    user: AuthenticatedUser,
    payload: web::Json<CreatePreferenceRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let preference = PreferenceService::instance()
        .create_preferences(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(preference))
}

/// `GET /api/v1/workout-preferences`
#[get("")]
pub async fn get_preferences(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let preference = PreferenceService::instance().get_preferences(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(preference))
}

/// `PUT /api/v1/workout-preferences`
#[put("")]
pub async fn update_preferences(
    user: AuthenticatedUser,
    payload: web::Json<UpdatePreferenceRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let preference = PreferenceService::instance()
        .update_preferences(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(preference))
}

/// `DELETE /api/v1/workout-preferences`
#[delete("")]
pub async fn delete_preferences(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    PreferenceService::instance().delete_preferences(&user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/v1/workout-preferences/matches?intensity_tolerance=&time_overlap=`
#[get("/matches")]
pub async fn matches(
    user: AuthenticatedUser,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, AppError> {
    let result = PreferenceService::instance()
        .find_matching_partners(&user.user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/workout-preferences/stats`
#[get("/stats")]
pub async fn stats(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ViewAnalytics)?;
    let result = PreferenceService::instance().get_stats().await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/workout-preferences/recommendations`
#[get("/recommendations")]
pub async fn recommendations(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let result = PreferenceService::instance().get_recommendations(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}
