//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Session objects come back as raw JSON and are relayed unchanged.

use crate::config::StripeConfig;
use async_trait::async_trait;
use donate_core::{CheckoutSessionParams, CheckoutStrategy, PaymentError, PaymentResult};
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page for secure payments.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// `{api_base_url}/v1/checkout/sessions[/{id}]` with the id encoded as one segment
    fn sessions_url(&self, session_id: Option<&str>) -> PaymentResult<Url> {
        // dot segments are dropped by the URL serializer
        if matches!(session_id, Some("" | "." | "..")) {
            return Err(PaymentError::InvalidRequest(format!(
                "Invalid checkout session id: {:?}",
                session_id.unwrap_or_default()
            )));
        }

        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!(
                "Invalid Stripe API base URL {}: {}",
                self.config.api_base_url, e
            ))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PaymentError::Configuration(format!(
                    "Stripe API base URL cannot be a base: {}",
                    self.config.api_base_url
                ))
            })?;
            segments.pop_if_empty().extend(["v1", "checkout", "sessions"]);
            if let Some(id) = session_id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    /// Attach auth and version headers, send, and decode the session object
    async fn send(&self, request: RequestBuilder) -> PaymentResult<serde_json::Value> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::provider(
                    PROVIDER,
                    error_response.error.message,
                ));
            }

            return Err(PaymentError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl CheckoutStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, params), fields(items = params.line_items.len()))]
    async fn create_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<serde_json::Value> {
        if params.line_items.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "Checkout session has no line items".to_string(),
            ));
        }

        let form_params = form_params(params);
        debug!(
            "Creating Stripe checkout session: {} form fields, mode={}",
            form_params.len(),
            params.mode.as_str()
        );

        let url = self.sessions_url(None)?;
        let session = self.send(self.client.post(url).form(&form_params)).await?;

        info!(
            "Created Stripe checkout session: id={}",
            session.get("id").and_then(|v| v.as_str()).unwrap_or("unknown")
        );

        Ok(session)
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<serde_json::Value> {
        let url = self.sessions_url(Some(session_id))?;
        let session = self.send(self.client.get(url)).await?;

        debug!("Retrieved Stripe checkout session: id={}", session_id);

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Flatten session params into Stripe's bracketed form encoding
fn form_params(params: &CheckoutSessionParams) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = vec![
        ("mode".to_string(), params.mode.as_str().to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in params.line_items.iter().enumerate() {
        form.push((
            format!("line_items[{}][price_data][currency]", i),
            item.price_data.currency.as_str().to_string(),
        ));
        form.push((
            format!("line_items[{}][price_data][product_data][name]", i),
            item.price_data.product_data.name.clone(),
        ));
        form.push((
            format!("line_items[{}][price_data][unit_amount]", i),
            item.price_data.unit_amount.to_string(),
        ));
        form.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    form
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
