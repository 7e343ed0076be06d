//! # Routes
//!
//! Axum router configuration for the donation checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{body::Body, http::Request, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health, / - Health check
/// - GET  /api/checkout_session?session_id=... - Retrieve checkout session
/// - POST /api/checkout_session - Create donation checkout session
pub fn create_router(state: AppState) -> Router {
    // Browser clients call the API cross-origin from the donation page
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            request_id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Checkout sessions
        .route(
            "/api/checkout_session",
            get(handlers::get_checkout_session).post(handlers::create_checkout_session),
        )
        // Middleware
        .layer(cors)
        .layer(trace)
        // State
        .with_state(state)
}
