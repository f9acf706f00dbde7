//! Integration tests for the payment HTTP endpoints.
//!
//! These tests drive the full router:
//! 1. Form bodies reach the gateway with the right values
//! 2. Every outcome is answered with `{ ok, message }`
//! 3. Pages carry the publishable key and nothing secret

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use stripe_forms::adapters::http::{payment_app, payment_router, ApiResponse, PaymentAppState};
use stripe_forms::adapters::stripe::{MockPaymentGateway, StripeConfig, StripePaymentAdapter};
use stripe_forms::domain::payment::{Coupon, CouponCode, CouponDuration};
use stripe_forms::ports::PaymentError;

// =============================================================================
// Test Infrastructure
// =============================================================================

const PUBLIC_KEY: &str = "pk_test_public123";
const SECRET_KEY: &str = "sk_test_secret456";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn app(mock: &MockPaymentGateway) -> Router {
    app_with_timeout(mock, REQUEST_TIMEOUT)
}

fn app_with_timeout(mock: &MockPaymentGateway, timeout: Duration) -> Router {
    payment_app(PaymentAppState::new(Arc::new(mock.clone()), PUBLIC_KEY), timeout)
}

async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, ApiResponse) {
    post(app, uri, Some("application/x-www-form-urlencoded"), body).await
}

async fn post(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, ApiResponse) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn coupon(id: &str, percent_off: Option<f64>, amount_off: Option<i64>, duration: CouponDuration) -> Coupon {
    Coupon {
        id: CouponCode::new(id),
        valid: true,
        percent_off,
        amount_off,
        currency: amount_off.map(|_| "usd".to_string()),
        duration,
        duration_in_months: None,
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

#[tokio::test]
async fn create_subscription_reports_subscription_id() {
    let mock = MockPaymentGateway::new();

    let (status, body) = post_form(
        app(&mock),
        "/create-subscription",
        "email=jane%40example.com&token=tok_visa&plan=plan_basic&coupon=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.ok);
    assert!(body.message.starts_with("Success! Your subscription id is sub_mock_"));

    let requests = mock.subscription_requests();
    assert_eq!(requests[0].plan, "plan_basic");
    assert!(requests[0].coupon.is_none());
}

#[tokio::test]
async fn create_subscription_without_token_makes_no_calls() {
    let mock = MockPaymentGateway::new();

    let (status, body) = post_form(
        app(&mock),
        "/create-subscription",
        "email=jane%40example.com&plan=plan_basic",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Stripe payment token is missing. Please, try again later."
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn create_subscription_without_plan_makes_no_calls() {
    let mock = MockPaymentGateway::new();

    let (_, body) = post_form(app(&mock), "/create-subscription", "token=tok_visa").await;

    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Stripe payment token is missing. Please, try again later."
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn customer_failure_uses_customer_message() {
    let mock = MockPaymentGateway::new();
    mock.set_method_error("create_customer", PaymentError::card_declined("Declined"));

    let (_, body) = post_form(
        app(&mock),
        "/create-subscription",
        "token=tok_visa&plan=plan_basic",
    )
    .await;

    assert!(!body.ok);
    assert_eq!(
        body.message,
        "An error occurred while trying to create a customer."
    );
    assert!(!mock.was_called("create_subscription"));
}

#[tokio::test]
async fn subscription_failure_uses_subscription_message() {
    let mock = MockPaymentGateway::new();
    mock.set_method_error(
        "create_subscription",
        PaymentError::invalid_request("No such plan"),
    );

    let (_, body) = post_form(
        app(&mock),
        "/create-subscription",
        "token=tok_visa&plan=plan_missing",
    )
    .await;

    assert!(!body.ok);
    assert_eq!(
        body.message,
        "An error occurred while trying to create a subscription."
    );
}

#[tokio::test]
async fn cancel_subscription_round_trip() {
    let mock = MockPaymentGateway::new();
    mock.set_subscription_status("sub_1", "active");

    let (_, body) = post_form(app(&mock), "/cancel-subscription", "subscriptionId=sub_1").await;
    assert!(body.ok);
    assert_eq!(body.message, "Subscription cancelled successfully.");

    let (_, body) = post_form(
        app(&mock),
        "/subscription-status",
        "subscriptionStatus=sub_1",
    )
    .await;
    assert!(body.ok);
    assert_eq!(body.message, "canceled");
}

#[tokio::test]
async fn cancel_failure_uses_fixed_message() {
    let mock = MockPaymentGateway::new();
    mock.set_method_error("cancel_subscription", PaymentError::not_found("Subscription"));

    let (_, body) = post_form(app(&mock), "/cancel-subscription", "subscriptionId=sub_x").await;

    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Failed to cancel the subscription. Please, try later."
    );
}

// =============================================================================
// Coupons
// =============================================================================

#[tokio::test]
async fn percent_coupon_is_described() {
    let mock = MockPaymentGateway::new();
    mock.add_coupon(coupon("SPRING20", Some(20.0), None, CouponDuration::Repeating));

    let (_, body) = post_form(app(&mock), "/coupon-validator", "code=SPRING20").await;

    assert!(body.ok);
    assert_eq!(body.message, "20% OFF repeating");
}

#[tokio::test]
async fn amount_coupon_is_described() {
    let mock = MockPaymentGateway::new();
    mock.add_coupon(coupon("FIVE", None, Some(500), CouponDuration::Once));

    let (_, body) = post_form(app(&mock), "/coupon-validator", "code=FIVE").await;

    assert!(body.ok);
    assert_eq!(body.message, "$5 OFF once");
}

#[tokio::test]
async fn unknown_or_expired_coupon_is_not_available() {
    let mock = MockPaymentGateway::new();
    mock.add_coupon(Coupon {
        valid: false,
        ..coupon("OLD", Some(10.0), None, CouponDuration::Forever)
    });
    let expected = "This coupon code is not available. This may be because it has expired or has already been applied to your account.";

    for code in ["OLD", "NOPE", ""] {
        let (_, body) =
            post_form(app(&mock), "/coupon-validator", &format!("code={}", code)).await;
        assert!(!body.ok, "coupon {:?} should be rejected", code);
        assert_eq!(body.message, expected);
    }
}

// =============================================================================
// Charges
// =============================================================================

#[tokio::test]
async fn create_charge_always_uses_fixed_amount() {
    let mock = MockPaymentGateway::new();

    let (_, body) = post_form(
        app(&mock),
        "/create-charge",
        "email=buyer%40example.com&token=tok_visa&amount=1",
    )
    .await;

    assert!(body.ok);
    assert!(body.message.starts_with("ch_mock_"));
    let requests = mock.charge_requests();
    assert_eq!(requests[0].amount, 999);
    assert_eq!(requests[0].currency, "usd");
}

#[tokio::test]
async fn create_charge_without_token_makes_no_calls() {
    let mock = MockPaymentGateway::new();

    let (_, body) = post_form(app(&mock), "/create-charge", "email=buyer%40example.com").await;

    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Stripe payment token is missing. Please, try again later."
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn failure_does_not_affect_later_requests() {
    let mock = MockPaymentGateway::new();
    mock.set_method_error("create_charge", PaymentError::network("connection reset"));

    let (_, body) = post_form(app(&mock), "/create-charge", "token=tok_visa").await;
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "An error occurred while trying to create a charge."
    );

    mock.clear_errors();

    let (_, body) = post_form(app(&mock), "/create-charge", "token=tok_visa").await;
    assert!(body.ok);
}

#[tokio::test]
async fn status_endpoints_return_raw_status() {
    let mock = MockPaymentGateway::new();
    mock.set_charge_status("ch_1", "succeeded");
    mock.set_subscription_status("sub_1", "past_due");

    let (_, body) = post_form(app(&mock), "/charge-status", "chargeId=ch_1").await;
    assert!(body.ok);
    assert_eq!(body.message, "succeeded");

    let (_, body) = post_form(app(&mock), "/subscription-status", "subscriptionId=sub_1").await;
    assert!(body.ok);
    assert_eq!(body.message, "past_due");
}

#[tokio::test]
async fn status_failures_use_fixed_messages() {
    let mock = MockPaymentGateway::new();

    let (_, body) = post_form(app(&mock), "/charge-status", "chargeId=ch_missing").await;
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Unable to retrieve the charge status. Please, try later."
    );

    let (_, body) = post_form(
        app(&mock),
        "/subscription-status",
        "subscriptionStatus=sub_missing",
    )
    .await;
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Unable to retrieve the subscription status. Please, try later."
    );
}

// =============================================================================
// Unreadable requests and timeouts
// =============================================================================

#[tokio::test]
async fn repeated_token_gets_the_missing_token_answer() {
    let mock = MockPaymentGateway::new();

    let (status, body) = post_form(app(&mock), "/create-charge", "token=a&token=b").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Stripe payment token is missing. Please, try again later."
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn repeated_fields_answer_with_each_endpoint_message() {
    let mock = MockPaymentGateway::new();

    let cases = [
        ("/create-subscription", "token=a&token=b&plan=price_1", "Stripe payment token is missing. Please, try again later."),
        ("/cancel-subscription", "subscriptionId=a&subscriptionId=b", "Failed to cancel the subscription. Please, try later."),
        ("/coupon-validator", "code=A&code=B", "This coupon code is not available. This may be because it has expired or has already been applied to your account."),
        ("/charge-status", "chargeId=a&chargeId=b", "Unable to retrieve the charge status. Please, try later."),
        ("/subscription-status", "subscriptionId=a&subscriptionId=b", "Unable to retrieve the subscription status. Please, try later."),
    ];

    for (uri, form, message) in cases {
        let (status, body) = post_form(app(&mock), uri, form).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(!body.ok, "{}", uri);
        assert_eq!(body.message, message, "{}", uri);
    }
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn subscription_status_accepts_both_field_names_at_once() {
    let mock = MockPaymentGateway::new();
    mock.set_subscription_status("sub_1", "active");

    let (status, body) = post_form(
        app(&mock),
        "/subscription-status",
        "subscriptionStatus=sub_1&subscriptionId=sub_1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.ok);
    assert_eq!(body.message, "active");
}

#[tokio::test]
async fn missing_content_type_gets_a_failure_body() {
    let mock = MockPaymentGateway::new();

    let (status, body) = post(app(&mock), "/create-charge", None, "token=tok_visa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "Stripe payment token is missing. Please, try again later."
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn slow_gateway_times_out_with_a_failure_body() {
    let mock = MockPaymentGateway::new();
    mock.set_latency(Duration::from_secs(5));
    let app = app_with_timeout(&mock, Duration::from_millis(50));

    let (status, body) = post_form(app, "/create-charge", "token=tok_visa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "An error occurred while trying to create a charge."
    );
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn pages_render() {
    let mock = MockPaymentGateway::new();

    for uri in ["/", "/subscription", "/charge"] {
        let (status, html) = get_page(app(&mock), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(html.contains("<html"), "{}", uri);
    }
}

#[tokio::test]
async fn subscription_page_exposes_public_key_only() {
    let mock = MockPaymentGateway::new();

    let (_, html) = get_page(app(&mock), "/subscription").await;

    assert!(html.contains(PUBLIC_KEY));
    assert!(!html.contains(SECRET_KEY));
    assert!(!html.contains("sk_"));
}

// =============================================================================
// Router over the Stripe adapter
// =============================================================================

#[tokio::test]
async fn charge_through_stripe_adapter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/charges")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("amount".into(), "999".into()),
            mockito::Matcher::UrlEncoded("currency".into(), "usd".into()),
            mockito::Matcher::UrlEncoded("source".into(), "tok_visa".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"ch_live_1","amount":999,"currency":"usd","status":"succeeded","paid":true}"#,
        )
        .create_async()
        .await;

    let adapter = StripePaymentAdapter::new(StripeConfig::new(SECRET_KEY).with_base_url(server.url()));
    let app = payment_router().with_state(PaymentAppState::new(Arc::new(adapter), PUBLIC_KEY));

    let (_, body) = post_form(app, "/create-charge", "token=tok_visa").await;

    mock.assert_async().await;
    assert!(body.ok);
    assert_eq!(body.message, "ch_live_1");
}

#[tokio::test]
async fn declined_card_through_stripe_adapter() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/charges")
        .with_status(402)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"type":"card_error","code":"card_declined","decline_code":"generic_decline","message":"Your card was declined."}}"#,
        )
        .create_async()
        .await;

    let adapter = StripePaymentAdapter::new(StripeConfig::new(SECRET_KEY).with_base_url(server.url()));
    let app = payment_router().with_state(PaymentAppState::new(Arc::new(adapter), PUBLIC_KEY));

    let (status, body) = post_form(app, "/create-charge", "token=tok_chargeDeclined").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.ok);
    assert_eq!(
        body.message,
        "An error occurred while trying to create a charge."
    );
}
