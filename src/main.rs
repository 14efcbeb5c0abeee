//! Fitness service entry point.
//!
//! Boots the Actix-web HTTP server: loads environment configuration,
//! connects MongoDB and Redis, registers every singleton service and
//! repository, ensures database indexes and seeds the initial super admin
//! account before accepting traffic.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use fitness_service_backend::caching::redis::RedisClient;
use fitness_service_backend::config::ServerConfig;
use fitness_service_backend::core::registry::ServiceLocator;
use fitness_service_backend::db::Database;
use fitness_service_backend::repositories::fitness::{
    PreferenceRepository, ProfileRepository, ProgressRepository,
};
use fitness_service_backend::repositories::users::UserRepository;
use fitness_service_backend::routes::configure_all_routes;
use fitness_service_backend::services::users::user_service::UserService;

/// Rate limiting settings read from the environment.
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 Starting fitness service...");

    let (database, redis_client) = initialize_data_stores().await;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .expect("service initialization failed");

    info!("✅ All services initialized!");

    ensure_indexes().await;
    seed_initial_accounts().await;

    start_http_server().await
}

/// Configures and runs the HTTP server.
///
/// Wraps the app in rate limiting, CORS, request logging and path
/// normalization middleware, then binds to the host and port from
/// [`ServerConfig`].
///
/// # Errors
///
/// * `std::io::Error` - bind failure or server runtime error
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 Server running at http://{}", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API base: http://{}/api/v1", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .expect("invalid rate limit configuration");

    info!(
        "🛡️ Rate limiting enabled: {} req/s, burst {}",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // rate limiting runs before everything else
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// Loads the env file matching the `PROFILE` environment variable.
///
/// * `PROFILE=dev` - loads .env.dev (default)
/// * `PROFILE=prod` - loads .env.prod
/// * anything else - loads the plain .env file
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod loaded"),
            Err(e) => error!("failed to load .env.prod: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev loaded"),
            Err(e) => error!("failed to load .env.dev: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("default .env loaded");
        }
    }
}

/// Initializes logging from `RUST_LOG` (default: "info,actix_web=debug").
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// Connects MongoDB and Redis.
///
/// # Panics
///
/// Panics when either connection fails; the service cannot run without
/// its data stores.
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 Connecting data stores...");

    let database = Arc::new(Database::new().await.expect("MongoDB connection failed"));

    info!("✅ MongoDB connected");

    let redis_client = Arc::new(RedisClient::new().await.expect("Redis connection failed"));

    info!("✅ Redis connected");

    (database, redis_client)
}

/// Creates the MongoDB indexes every repository relies on.
///
/// Index creation is idempotent; failures are logged but do not abort
/// startup since reads and writes still work without them.
async fn ensure_indexes() {
    if let Err(e) = UserRepository::instance().create_indexes().await {
        warn!("user index creation failed: {}", e);
    }
    if let Err(e) = ProfileRepository::instance().create_indexes().await {
        warn!("profile index creation failed: {}", e);
    }
    if let Err(e) = ProgressRepository::instance().create_indexes().await {
        warn!("fitness progress index creation failed: {}", e);
    }
    if let Err(e) = PreferenceRepository::instance().create_indexes().await {
        warn!("workout preference index creation failed: {}", e);
    }

    info!("✅ Database indexes ensured");
}

/// Provisions the initial super admin account when seed credentials are
/// configured.
async fn seed_initial_accounts() {
    if let Err(e) = UserService::instance().seed_super_admin().await {
        warn!("super admin seeding failed: {}", e);
    }
}

/// Builds the CORS middleware.
///
/// Allows the local frontend dev servers and mirrors of this service on
/// 127.0.0.1, with credential support and a one hour preflight cache.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// Reads rate limiting settings from the environment.
///
/// * `RATE_LIMIT_PER_SECOND` - allowed requests per second (default: 100)
/// * `RATE_LIMIT_BURST_SIZE` - burst allowance (default: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200);

    RateLimitConfig {
        per_second,
        burst_size,
    }
}
