//! # donate-stripe
//!
//! Stripe Checkout Sessions strategy for donate-checkout.
//!
//! `StripeCheckoutStrategy` talks to two endpoints:
//! - `POST /v1/checkout/sessions` to create a hosted checkout session
//! - `GET /v1/checkout/sessions/{id}` to retrieve one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use donate_core::{CheckoutSessionParams, CheckoutStrategy};
//! use donate_stripe::StripeCheckoutStrategy;
//!
//! // Create strategy from environment
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! let session = strategy
//!     .create_session(&CheckoutSessionParams::donation("https://give.example.org"))
//!     .await?;
//!
//! // Redirect user to session["url"]
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
