//! Route configuration and setup.

mod health;

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use filedrop_core::Config;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the file itself. Bodies past
/// the limit are cut off inside the multipart extractor, which the upload handler reports
/// with the size-limit message.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let body_limit = state
        .upload
        .constraints
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    tracing::debug!(body_limit_bytes = body_limit, "Request body limit layer enabled");

    let app = Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route("/health", get(health::health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

// Credentials are allowed, so origin, methods and headers must be explicit or mirrored;
// tower-http refuses `Any` together with credentials.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origin: HeaderValue = config
        .cors_origin()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin(), e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
