//! User administration HTTP handlers.
//!
//! All routes sit behind the scope-level `AuthMiddleware`; each one
//! additionally checks the specific permission it needs, mirroring
//! the role matrix: trainer management needs `manage:trainers`, admin
//! management needs `system:settings`, the rest need `manage:users`.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{CreateUserRequest, ListUsersQuery, UpdateUserRequest};
use crate::domain::entities::users::user::{UserPermission, UserRole};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::users::user_service::UserService;

/// `POST /api/v1/users/trainers`
#[post("/trainers")]
pub async fn create_trainer(
    user: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageTrainers)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let response = UserService::instance()
        .create_with_role(
            request.first_name,
            request.last_name,
            request.email,
            &request.password,
            request.phone_number,
            UserRole::Trainer,
        )
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// `POST /api/v1/users/admins`
#[post("/admins")]
pub async fn create_admin(
    user: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::SystemSettings)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let response = UserService::instance()
        .create_with_role(
            request.first_name,
            request.last_name,
            request.email,
            &request.password,
            request.phone_number,
            UserRole::Admin,
        )
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// `GET /api/v1/users/trainers`
#[get("/trainers")]
pub async fn list_trainers(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageTrainers)?;
    let trainers = UserService::instance().list_by_role(UserRole::Trainer).await?;
    Ok(HttpResponse::Ok().json(trainers))
}

/// `GET /api/v1/users/admins`
#[get("/admins")]
pub async fn list_admins(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::SystemSettings)?;
    let admins = UserService::instance().list_by_role(UserRole::Admin).await?;
    Ok(HttpResponse::Ok().json(admins))
}

/// `GET /api/v1/users?role=&is_active=`
#[get("")]
pub async fn list_users(
    user: AuthenticatedUser,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageUsers)?;
    let users = UserService::instance().list_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// `GET /api/v1/users/{id}`
#[get("/{id}")]
pub async fn get_user(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageUsers)?;
    let found = UserService::instance().get_user_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// `PUT /api/v1/users/{id}`
#[put("/{id}")]
pub async fn update_user(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageUsers)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated = UserService::instance()
        .update_user(&path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// `DELETE /api/v1/users/{id}`: soft delete.
#[delete("/{id}")]
pub async fn delete_user(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_permission(UserPermission::ManageUsers)?;
    UserService::instance().delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
