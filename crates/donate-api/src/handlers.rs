//! # Request Handlers
//!
//! Axum request handlers for the donation checkout API.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header::ORIGIN, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use donate_core::CheckoutSessionParams;
use serde::Serialize;
use tracing::{error, info, instrument};

pub const SESSION_ID_REQUIRED: &str = "Session ID is required";
pub const RETRIEVE_FAILED: &str = "Error retrieving checkout session";
pub const CREATE_FAILED: &str = "Failed to create Stripe Checkout session";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Raw query pairs in request order; repeated keys are kept
pub type QueryPairs = Vec<(String, String)>;

/// First value for `key`, matching `URLSearchParams::get`
pub fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Error payload: `{"message": ...}` on retrieval, a bare string on creation
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message { message: String },
    Text(String),
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl ErrorResponse {
    /// `{"error": {"message": ...}}`
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail::Message {
                message: message.into(),
            },
        }
    }

    /// `{"error": ...}`
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail::Text(message.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "donate-checkout",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Retrieve a checkout session by `?session_id=`
#[instrument(skip(state, query))]
pub async fn get_checkout_session(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> ApiResult<Json<serde_json::Value>> {
    let session_id = first_param(&query, "session_id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message(SESSION_ID_REQUIRED)),
            )
        })?;

    let session = state
        .strategy
        .retrieve_session(session_id)
        .await
        .map_err(|e| {
            error!(
                session_id = %session_id,
                upstream = e.is_upstream(),
                "Error retrieving checkout session: {}",
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message(RETRIEVE_FAILED)),
            )
        })?;

    Ok(Json(session))
}

/// Create the fixed donation checkout session
#[instrument(skip(state, headers))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let origin = request_origin(&headers, &state.config.base_url);
    let params = CheckoutSessionParams::donation(origin);

    info!(
        "Creating donation checkout: origin={}, provider={}",
        origin,
        state.strategy.provider_name()
    );

    let session = state.strategy.create_session(&params).await.map_err(|e| {
        error!(
            upstream = e.is_upstream(),
            "Error creating Stripe Checkout session: {}",
            e
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::text(CREATE_FAILED)),
        )
    })?;

    Ok((StatusCode::OK, Json(session)))
}

/// `Origin` header if present and readable, otherwise the configured base URL
fn request_origin<'a>(headers: &'a HeaderMap, fallback: &'a str) -> &'a str {
    headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}
