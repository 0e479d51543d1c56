//! Class Roster Backend
//!
//! A REST backend for tracking classes and their member rosters, persisted in SQLite.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod service;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use db::ClassRepository;
use service::ClassService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub classes: Arc<ClassService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_tracing(&config);

    tracing::info!("Starting Class Roster Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let pool = db::init_database(&config.db_path).await?;
    let classes = Arc::new(ClassService::new(ClassRepository::new(pool)));

    if config.seed_defaults {
        classes.initialize_default_classes().await?;
    } else {
        tracing::info!("Skipping default class seed (ROSTER_SEED_DEFAULTS=false)");
    }

    let state = AppState {
        classes,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global tracing subscriber.
fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = match &state.config.cors_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin.clone()),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/classes",
            get(api::list_classes).post(api::create_class),
        )
        .route("/classes/initialize", post(api::initialize_classes))
        .route("/classes/code/{code}", get(api::get_class_by_code))
        .route(
            "/classes/{id}",
            get(api::get_class)
                .put(api::update_class)
                .delete(api::delete_class),
        )
        .route("/classes/{id}/members", post(api::add_member))
        .route(
            "/classes/{id}/members/{member_id}",
            put(api::update_member_role).delete(api::remove_member),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
