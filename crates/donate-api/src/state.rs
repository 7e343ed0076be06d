//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the process-wide checkout strategy and server configuration.

use donate_core::BoxedCheckoutStrategy;
use donate_stripe::StripeCheckoutStrategy;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origin used for redirect URLs when a request carries no `Origin` header
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_format: match std::env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Bind the listener; `host` may be an IP literal or a resolvable name
    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout provider, created once per process
    pub strategy: BoxedCheckoutStrategy,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let stripe_strategy = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        if stripe_strategy.config().is_live_mode() {
            tracing::warn!("Stripe is running with a live secret key");
        }

        Ok(Self::with_strategy(Arc::new(stripe_strategy), config))
    }

    /// Build state around an explicit strategy
    pub fn with_strategy(strategy: BoxedCheckoutStrategy, config: AppConfig) -> Self {
        Self { strategy, config }
    }
}
