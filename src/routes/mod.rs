//! API route configuration.
//!
//! Groups the RESTful endpoints by feature and wires the
//! authentication middleware onto the protected scopes. Register and
//! login stay public; every fitness scope requires a bearer token and
//! the user-administration scope additionally checks permissions in
//! its handlers.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// Registers every route group plus the health check.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_profile_routes(cfg);
    configure_progress_routes(cfg);
    configure_preference_routes(cfg);
}

/// Authentication endpoints. All public: profile and refresh verify
/// the bearer token themselves.
///
/// - `POST /api/v1/auth/register`
/// - `POST /api/v1/auth/login`
/// - `GET  /api/v1/auth/profile`
/// - `POST /api/v1/auth/refresh`
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::profile)
            .service(handlers::auth::refresh),
    );
}

/// User administration. Fine-grained permission checks happen in the
/// handlers; the scope only enforces authentication. Literal routes
/// are registered before `/{id}` so they are matched first.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::create_trainer)
            .service(handlers::users::create_admin)
            .service(handlers::users::list_trainers)
            .service(handlers::users::list_admins)
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

/// Fitness profiles, own-profile CRUD plus search and analytics.
fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(AuthMiddleware::required())
            .service(handlers::profiles::nearby)
            .service(handlers::profiles::search)
            .service(handlers::profiles::completion)
            .service(handlers::profiles::stats)
            .service(handlers::profiles::create_profile)
            .service(handlers::profiles::get_my_profile)
            .service(handlers::profiles::update_my_profile)
            .service(handlers::profiles::delete_my_profile),
    );
}

/// Fitness progress tracking and analytics.
fn configure_progress_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fitness-progress")
            .wrap(AuthMiddleware::required())
            .service(handlers::progress::add_measurement)
            .service(handlers::progress::add_metric)
            .service(handlers::progress::history)
            .service(handlers::progress::period_progress)
            .service(handlers::progress::stats)
            .service(handlers::progress::trends)
            .service(handlers::progress::create_progress)
            .service(handlers::progress::get_progress)
            .service(handlers::progress::update_progress)
            .service(handlers::progress::delete_progress),
    );
}

/// Workout preferences, partner matching and community stats.
fn configure_preference_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/workout-preferences")
            .wrap(AuthMiddleware::required())
            .service(handlers::preferences::matches)
            .service(handlers::preferences::stats)
            .service(handlers::preferences::recommendations)
            .service(handlers::preferences::create_preferences)
            .service(handlers::preferences::get_preferences)
            .service(handlers::preferences::update_preferences)
            .service(handlers::preferences::delete_preferences),
    );
}

/// Liveness endpoint for load balancers and monitoring.
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "fitness_service_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
