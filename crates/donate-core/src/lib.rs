//! # donate-core
//!
//! Core types and traits for the donate-checkout service.
//!
//! This crate provides:
//! - `CheckoutStrategy` trait for implementing checkout providers
//! - `CheckoutSessionParams` and `LineItem` for the session request
//! - `Currency` and `Price` for minor-unit amounts
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use donate_core::{CheckoutSessionParams, CheckoutStrategy};
//!
//! // One "Donation" item, redirecting back to the caller's origin
//! let params = CheckoutSessionParams::donation("https://give.example.org");
//!
//! let session = strategy.create_session(&params).await?;
//! // Redirect user to session["url"]
//! ```

pub mod error;
pub mod price;
pub mod session;
pub mod strategy;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use price::{Currency, Price};
pub use session::{
    CheckoutMode, CheckoutSessionParams, LineItem, PriceData, ProductData, ResultUrls,
    CHECKOUT_SESSION_ID_PLACEHOLDER,
};
pub use strategy::{BoxedCheckoutStrategy, CheckoutStrategy};
