//! Fitness progress HTTP handlers.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::fitness::progress::{
    AddMeasurementRequest, CreateProgressRequest, HistoryQuery, ProgressQuery,
    UpdateProgressRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::fitness::progress_service::ProgressService;

/// `POST /api/v1/fitness-progress`
#[post("")]
pub async fn create_progress(
    user: AuthenticatedUser,
    payload: web::Json<CreateProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let progress = ProgressService::instance()
        .create_progress(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(progress))
}

/// `GET /api/v1/fitness-progress`
#[get("")]
pub async fn get_progress(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let progress = ProgressService::instance().get_progress(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(progress))
}

/// `PUT /api/v1/fitness-progress`
#[put("")]
pub async fn update_progress(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let progress = ProgressService::instance()
        .update_progress(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

/// `DELETE /api/v1/fitness-progress`
#[delete("")]
pub async fn delete_progress(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    ProgressService::instance().delete_progress(&user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `POST /api/v1/fitness-progress/measurements`: records a body measurement.
#[post("/measurements")]
pub async fn add_measurement(
    user: AuthenticatedUser,
    payload: web::Json<AddMeasurementRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let progress = ProgressService::instance()
        .add_measurement(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(progress))
}

/// `POST /api/v1/fitness-progress/metrics`: records a performance metric.
#[post("/metrics")]
pub async fn add_metric(
    user: AuthenticatedUser,
    payload: web::Json<AddMeasurementRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let progress = ProgressService::instance()
        .add_metric(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(progress))
}

/// `GET /api/v1/fitness-progress/history?type=&start_date=&end_date=`
#[get("/history")]
pub async fn history(
    user: AuthenticatedUser,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let result = ProgressService::instance()
        .get_history(&user.user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/fitness-progress/progress?type=&period=`
#[get("/progress")]
pub async fn period_progress(
    user: AuthenticatedUser,
    query: web::Query<ProgressQuery>,
) -> Result<HttpResponse, AppError> {
    let result = ProgressService::instance()
        .calculate_progress(&user.user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/fitness-progress/stats`
#[get("/stats")]
pub async fn stats(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let result = ProgressService::instance().get_stats(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `GET /api/v1/fitness-progress/trends`
#[get("/trends")]
pub async fn trends(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let result = ProgressService::instance().analyze_trends(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}
