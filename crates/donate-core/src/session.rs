//! # Checkout Session Types
//!
//! Request shapes for creating a hosted checkout session, plus the fixed
//! donation request the service sends on every create call.

use crate::price::{Currency, Price};
use serde::{Deserialize, Serialize};

/// Placeholder the provider replaces with the real session id on redirect
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Product name shown on the hosted checkout page
pub const DONATION_NAME: &str = "Donation";

/// Donation amount in major currency units
pub const DONATION_AMOUNT: f64 = 5.0;

/// Donation currency
pub const DONATION_CURRENCY: Currency = Currency::USD;

/// Path (relative to the caller's origin) the provider redirects back to
pub const RESULT_PATH: &str = "/result";

/// Checkout mode; donations are always one-time payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Product shown for an ad-hoc price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
}

/// Inline price definition for a line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    pub currency: Currency,
    pub product_data: ProductData,
    /// Amount in smallest currency unit
    pub unit_amount: i64,
}

/// A line item in a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with an inline price
    pub fn new(name: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            price_data: PriceData {
                currency: price.currency,
                product_data: ProductData { name: name.into() },
                unit_amount: price.amount,
            },
            quantity,
        }
    }

    /// The fixed donation item
    pub fn donation() -> Self {
        Self::new(
            DONATION_NAME,
            Price::new(DONATION_AMOUNT, DONATION_CURRENCY),
            1,
        )
    }
}

/// Redirect URLs handed to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl ResultUrls {
    /// Both URLs point at `{origin}/result?session_id={CHECKOUT_SESSION_ID}`
    pub fn for_origin(origin: &str) -> Self {
        let url = format!(
            "{}{}?session_id={}",
            origin.trim_end_matches('/'),
            RESULT_PATH,
            CHECKOUT_SESSION_ID_PLACEHOLDER
        );
        Self {
            success_url: url.clone(),
            cancel_url: url,
        }
    }
}

/// Parameters for creating a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionParams {
    pub mode: CheckoutMode,
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutSessionParams {
    /// Card-only payment session for the given items
    pub fn payment(line_items: Vec<LineItem>, urls: ResultUrls) -> Self {
        Self {
            mode: CheckoutMode::Payment,
            payment_method_types: vec!["card".to_string()],
            line_items,
            success_url: urls.success_url,
            cancel_url: urls.cancel_url,
        }
    }

    /// The fixed single-item donation session for a caller's origin
    pub fn donation(origin: &str) -> Self {
        Self::payment(vec![LineItem::donation()], ResultUrls::for_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_line_item() {
        let item = LineItem::donation();
        assert_eq!(item.price_data.product_data.name, "Donation");
        assert_eq!(item.price_data.unit_amount, 500);
        assert_eq!(item.price_data.currency, Currency::USD);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_result_urls() {
        let urls = ResultUrls::for_origin("https://give.example.org");
        assert_eq!(
            urls.success_url,
            "https://give.example.org/result?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.success_url, urls.cancel_url);
    }

    #[test]
    fn test_result_urls_trailing_slash() {
        let urls = ResultUrls::for_origin("http://localhost:3000/");
        assert_eq!(
            urls.cancel_url,
            "http://localhost:3000/result?session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_donation_params() {
        let params = CheckoutSessionParams::donation("http://localhost:3000");
        assert_eq!(params.mode, CheckoutMode::Payment);
        assert_eq!(params.payment_method_types, vec!["card"]);
        assert_eq!(params.line_items, vec![LineItem::donation()]);
        assert!(params.success_url.starts_with("http://localhost:3000"));
    }

    #[test]
    fn test_checkout_mode() {
        assert_eq!(CheckoutMode::default(), CheckoutMode::Payment);
        assert_eq!(CheckoutMode::Payment.as_str(), "payment");
        assert_eq!(
            serde_json::to_value(CheckoutMode::Payment).unwrap(),
            "payment"
        );
    }

    #[test]
    fn test_params_serialize() {
        let params = CheckoutSessionParams::donation("http://localhost:3000");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["mode"], "payment");
        assert_eq!(value["line_items"][0]["price_data"]["currency"], "usd");
        assert_eq!(value["line_items"][0]["price_data"]["unit_amount"], 500);
    }
}
