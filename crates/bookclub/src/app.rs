use std::time::Duration;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        signup::create_signup,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Browsers may only submit signups from the configured origin
    let cors = match HeaderValue::from_str(&state.cors_allowed_origin) {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(err) => {
            tracing::warn!(
                origin = %state.cors_allowed_origin,
                error = %err,
                "Invalid CORS origin, cross-origin requests will be refused"
            );
            CorsLayer::new()
        }
    }
    .allow_methods([Method::POST])
    .allow_headers(Any);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/bookclubsignup", post(create_signup))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
