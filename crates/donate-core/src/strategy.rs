//! # Checkout Strategy Trait
//!
//! Strategy pattern trait for checkout providers. The HTTP layer only talks
//! to `dyn CheckoutStrategy`, so the Stripe client can be swapped for an
//! in-memory provider in tests.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        CheckoutStrategy (trait)          │
//! │  ├── create_session()                    │
//! │  ├── retrieve_session()                  │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                    ▲
//!                    │
//!          ┌─────────┴─────────┐
//!          │  StripeCheckout   │
//!          │     Strategy      │
//!          └───────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::session::CheckoutSessionParams;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for checkout provider implementations.
///
/// Session objects are owned by the provider and returned as raw JSON so the
/// API layer can relay them without reshaping.
#[async_trait]
pub trait CheckoutStrategy: Send + Sync {
    /// Create a checkout session.
    ///
    /// # Returns
    /// The provider's session object, verbatim.
    async fn create_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<serde_json::Value>;

    /// Retrieve an existing checkout session by id.
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<serde_json::Value>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Shared handle to a checkout strategy (dynamic dispatch)
pub type BoxedCheckoutStrategy = Arc<dyn CheckoutStrategy>;
