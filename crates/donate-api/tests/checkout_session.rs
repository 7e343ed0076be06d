use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use donate_api::{create_router, AppConfig, AppState, LogFormat};
use donate_core::{CheckoutSessionParams, CheckoutStrategy, PaymentError, PaymentResult};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory provider that records calls and echoes params back as a session
#[derive(Default)]
struct FakeStripe {
    fail: bool,
    created: Mutex<Vec<CheckoutSessionParams>>,
    retrieved: Mutex<Vec<String>>,
}

impl FakeStripe {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CheckoutStrategy for FakeStripe {
    async fn create_session(&self, params: &CheckoutSessionParams) -> PaymentResult<Value> {
        self.created.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(PaymentError::provider("stripe", "Invalid API Key provided"));
        }
        Ok(json!({
            "id": "cs_test_created",
            "object": "checkout.session",
            "mode": params.mode,
            "line_items": params.line_items,
            "success_url": params.success_url,
            "cancel_url": params.cancel_url,
        }))
    }

    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<Value> {
        self.retrieved.lock().unwrap().push(session_id.to_string());
        if self.fail {
            return Err(PaymentError::NetworkError("connection reset".into()));
        }
        Ok(json!({
            "id": session_id,
            "object": "checkout.session",
            "payment_status": "paid",
            "amount_total": 500,
        }))
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

fn app(strategy: Arc<FakeStripe>) -> Router {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "http://localhost:8080".to_string(),
        environment: "test".to_string(),
        log_format: LogFormat::Pretty,
    };
    create_router(AppState::with_strategy(strategy, config))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/checkout_session");
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn get_without_session_id_is_bad_request() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake.clone()), get("/api/checkout_session")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": { "message": "Session ID is required" } }));
    assert!(fake.retrieved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_with_empty_session_id_is_bad_request() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake.clone()), get("/api/checkout_session?session_id=")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Session ID is required");
    assert!(fake.retrieved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_returns_provider_session_verbatim() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(
        app(fake.clone()),
        get("/api/checkout_session?session_id=cs_test_a1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "cs_test_a1",
            "object": "checkout.session",
            "payment_status": "paid",
            "amount_total": 500,
        })
    );
    assert_eq!(*fake.retrieved.lock().unwrap(), vec!["cs_test_a1".to_string()]);
}

#[tokio::test]
async fn get_with_repeated_session_id_uses_first() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(
        app(fake.clone()),
        get("/api/checkout_session?session_id=cs_test_a1&session_id=cs_test_b2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "cs_test_a1");
    assert_eq!(*fake.retrieved.lock().unwrap(), vec!["cs_test_a1".to_string()]);
}

#[tokio::test]
async fn get_with_other_params_only_is_bad_request() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake.clone()), get("/api/checkout_session?id=cs_test_a1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": { "message": "Session ID is required" } }));
    assert!(fake.retrieved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_provider_failure_is_internal_error() {
    let fake = Arc::new(FakeStripe::failing());
    let (status, body) = send(app(fake), get("/api/checkout_session?session_id=cs_test_a1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": { "message": "Error retrieving checkout session" } })
    );
}

#[tokio::test]
async fn post_creates_donation_session() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake.clone()), post(Some("https://give.example.org"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "cs_test_created");
    assert_eq!(body["mode"], "payment");

    let items = body["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price_data"]["product_data"]["name"], "Donation");
    assert_eq!(items[0]["price_data"]["unit_amount"], 500);
    assert_eq!(items[0]["price_data"]["currency"], "usd");
    assert_eq!(items[0]["quantity"], 1);

    let created = fake.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].payment_method_types, vec!["card".to_string()]);
}

#[tokio::test]
async fn post_urls_carry_origin_and_placeholder() {
    let fake = Arc::new(FakeStripe::default());
    let (_, body) = send(app(fake), post(Some("https://give.example.org"))).await;

    let expected = "https://give.example.org/result?session_id={CHECKOUT_SESSION_ID}";
    assert_eq!(body["success_url"], expected);
    assert_eq!(body["cancel_url"], expected);
}

#[tokio::test]
async fn post_without_origin_uses_base_url() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake), post(None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["success_url"],
        "http://localhost:8080/result?session_id={CHECKOUT_SESSION_ID}"
    );
}

#[tokio::test]
async fn post_provider_failure_is_internal_error() {
    let fake = Arc::new(FakeStripe::failing());
    let (status, body) = send(app(fake.clone()), post(Some("https://give.example.org"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create Stripe Checkout session" }));
    assert_eq!(fake.created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn health_reports_service() {
    let fake = Arc::new(FakeStripe::default());
    let (status, body) = send(app(fake), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "donate-checkout");
}
