//! Axum router configuration for the payment pages and form endpoints.

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;

use super::handlers::{
    cancel_subscription, charge_status, create_charge, create_subscription, handle_timeout,
    health, subscription_status, validate_coupon, PaymentAppState,
};
use super::pages::{charge_page, homepage, subscription_page};

/// Create the page router.
///
/// # Routes
/// - `GET /` - Landing page
/// - `GET /subscription` - Subscription page
/// - `GET /charge` - One-off purchase page
pub fn page_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/subscription", get(subscription_page))
        .route("/charge", get(charge_page))
}

/// Create the form endpoint router.
///
/// All endpoints take form-encoded bodies and answer `{ ok, message }`.
///
/// # Routes
/// - `POST /create-subscription`
/// - `POST /cancel-subscription`
/// - `POST /coupon-validator`
/// - `POST /create-charge`
/// - `POST /charge-status`
/// - `POST /subscription-status`
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/create-subscription", post(create_subscription))
        .route("/cancel-subscription", post(cancel_subscription))
        .route("/coupon-validator", post(validate_coupon))
        .route("/create-charge", post(create_charge))
        .route("/charge-status", post(charge_status))
        .route("/subscription-status", post(subscription_status))
}

/// Create the complete router: pages, form endpoints and `GET /health`.
///
/// # Example
///
/// ```ignore
/// let state = PaymentAppState::new(Arc::new(adapter), config.payment.stripe_public_key);
/// let app = payment_router().with_state(state);
/// ```
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .merge(page_routes())
        .merge(payment_routes())
        .route("/health", get(health))
}

/// The served application: [`payment_router`] with its state and a
/// whole-request timeout.
///
/// A form request that runs past `request_timeout` still gets its
/// endpoint's `{ ok: false, message }` body.
pub fn payment_app(state: PaymentAppState, request_timeout: Duration) -> Router {
    payment_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
