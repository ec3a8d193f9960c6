//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors render through the
//! auth crate.

use anyhow::Context;
use auth::{AuthConfig, PgUserRepository, api_router, seed_demo_user};
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5136";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Auth configuration
    let auth_config = AuthConfig::from_env()?;
    auth_config.validate()?;
    let auth_config = Arc::new(auth_config);

    tracing::info!(
        issuer = %auth_config.jwt_issuer,
        audience = %auth_config.jwt_audience,
        token_ttl_secs = auth_config.token_ttl_secs(),
        kdf_iterations = auth_config.kdf_iterations,
        "Auth configuration loaded"
    );

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));

    // Demo account on an empty database
    if seed_demo_user(user_repo.clone(), auth_config.clone()).await? {
        tracing::info!("Demo user created");
    }

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(api_router(user_repo, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("BIND_ADDR '{bind_addr}' is not a socket address"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /health
async fn health() -> &'static str {
    "Healthy"
}

/// CORS for the browser client
///
/// `FRONTEND_ORIGINS` (comma separated) restricts origins; unset allows any.
/// Tokens travel in the Authorization header, so no credentials mode.
fn cors_layer() -> CorsLayer {
    let origins = match env::var("FRONTEND_ORIGINS") {
        Ok(list) => {
            let allowed: Vec<http::HeaderValue> = list
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        Err(_) => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
