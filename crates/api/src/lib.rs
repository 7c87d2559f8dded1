//! # Lexcita API
//!
//! The web server for a law firm's public site and client portal: directory
//! management, appointment booking, inquiries, exports and the chat widget.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Session tokens, role checks and error mapping
//! - **Booking**: Time zone resolution and the conflict-checked booking flow
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// The booking flow shared by all appointment endpoints
pub mod booking;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use eyre::{eyre, Result};
use lexcita_db::repositories::appointment::{AppointmentStore, PgAppointmentStore};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    pub config: config::ApiConfig,
    /// Conflict-checked appointment writes
    pub appointments: Arc<dyn AppointmentStore>,
}

impl ApiState {
    pub fn new(config: config::ApiConfig, db_pool: PgPool) -> Self {
        let appointments = Arc::new(PgAppointmentStore::new(db_pool.clone()));
        Self::with_store(config, db_pool, appointments)
    }

    pub fn with_store(
        config: config::ApiConfig,
        db_pool: PgPool,
        appointments: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self {
            db_pool,
            config,
            appointments,
        }
    }
}

/// Assembles every route around the shared state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .merge(routes::appointment::routes())
        .merge(routes::directory::routes())
        .merge(routes::inquiry::routes())
        .merge(routes::report::routes())
        .merge(routes::calendar::routes())
        .merge(routes::assistant::routes())
        // URLs used by the public site's scripts
        .merge(routes::action::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<tower_http::cors::CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| eyre!("Invalid CORS origin {}: {}", origin, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(tower_http::cors::CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and database connection
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let addr = config.server_addr();
    let timeout = std::time::Duration::from_secs(config.request_timeout);
    let cors_origins = config.cors_origins.clone();

    let state = Arc::new(ApiState::new(config, db_pool));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
