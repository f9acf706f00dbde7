//! HTTP handlers for the payment form endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers and fold every outcome into an `ApiResponse`.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json};

use crate::application::handlers::payment::{
    CancelSubscriptionHandler, ChargeStatusHandler, CreateChargeHandler,
    CreateSubscriptionHandler, PaymentFlowError, SubscriptionStatusHandler, ValidateCouponHandler,
};
use crate::ports::{PaymentError, PaymentGateway};

use super::dto::{
    ApiResponse, CancelSubscriptionForm, ChargeStatusForm, CouponForm, CreateChargeForm,
    CreateSubscriptionForm, SubscriptionStatusForm,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
///
/// Cloned per request; nothing in it is mutated after startup.
#[derive(Clone)]
pub struct PaymentAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    /// Publishable key injected into the pages.
    pub public_key: String,
}

impl PaymentAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>, public_key: impl Into<String>) -> Self {
        Self {
            gateway,
            public_key: public_key.into(),
        }
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.gateway.clone())
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.gateway.clone())
    }

    pub fn validate_coupon_handler(&self) -> ValidateCouponHandler {
        ValidateCouponHandler::new(self.gateway.clone())
    }

    pub fn create_charge_handler(&self) -> CreateChargeHandler {
        CreateChargeHandler::new(self.gateway.clone())
    }

    pub fn charge_status_handler(&self) -> ChargeStatusHandler {
        ChargeStatusHandler::new(self.gateway.clone())
    }

    pub fn subscription_status_handler(&self) -> SubscriptionStatusHandler {
        SubscriptionStatusHandler::new(self.gateway.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create-subscription - Create a customer and subscribe them to a plan
pub async fn create_subscription(
    State(state): State<PaymentAppState>,
    form: Result<Form<CreateSubscriptionForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, |_| PaymentFlowError::MissingToken)?;
    let result = state
        .create_subscription_handler()
        .handle(form.into())
        .await?;

    Ok(Json(ApiResponse::success(format!(
        "Success! Your subscription id is {}",
        result.subscription_id
    ))))
}

/// POST /cancel-subscription - Cancel a subscription immediately
pub async fn cancel_subscription(
    State(state): State<PaymentAppState>,
    form: Result<Form<CancelSubscriptionForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, PaymentFlowError::CancellationFailed)?;
    state
        .cancel_subscription_handler()
        .handle(form.into())
        .await?;

    Ok(Json(ApiResponse::success(
        "Subscription cancelled successfully.",
    )))
}

/// POST /create-charge - Charge the fixed demo amount
pub async fn create_charge(
    State(state): State<PaymentAppState>,
    form: Result<Form<CreateChargeForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, |_| PaymentFlowError::MissingToken)?;
    let result = state.create_charge_handler().handle(form.into()).await?;

    Ok(Json(ApiResponse::success(result.charge_id.into_inner())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /coupon-validator - Describe a coupon if it can be redeemed
pub async fn validate_coupon(
    State(state): State<PaymentAppState>,
    form: Result<Form<CouponForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, |e| PaymentFlowError::CouponUnavailable(Some(e)))?;
    let result = state.validate_coupon_handler().handle(form.into()).await?;

    Ok(Json(ApiResponse::success(result.description)))
}

/// POST /charge-status - Current status of a charge
pub async fn charge_status(
    State(state): State<PaymentAppState>,
    form: Result<Form<ChargeStatusForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, PaymentFlowError::ChargeStatusUnavailable)?;
    let result = state.charge_status_handler().handle(form.into()).await?;

    Ok(Json(ApiResponse::success(result.status)))
}

/// POST /subscription-status - Current status of a subscription
pub async fn subscription_status(
    State(state): State<PaymentAppState>,
    form: Result<Form<SubscriptionStatusForm>, FormRejection>,
) -> Result<Json<ApiResponse>, PaymentApiError> {
    let form = read_form(form, PaymentFlowError::SubscriptionStatusUnavailable)?;
    let result = state
        .subscription_status_handler()
        .handle(form.into())
        .await?;

    Ok(Json(ApiResponse::success(result.status)))
}

/// GET /health - Liveness check
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Unwraps a form body. A body axum cannot read (wrong content type,
/// repeated field) fails with the endpoint's own error.
fn read_form<T>(
    form: Result<Form<T>, FormRejection>,
    on_reject: impl FnOnce(PaymentError) -> PaymentFlowError,
) -> Result<T, PaymentApiError> {
    form.map(|Form(inner)| inner).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable form body");
        PaymentApiError(on_reject(PaymentError::invalid_request(
            rejection.body_text(),
        )))
    })
}

/// Error handler for the request timeout layer.
///
/// Form endpoints answer with their failure body; anything else gets a bare 408.
pub async fn handle_timeout(uri: Uri, err: BoxError) -> Response {
    let cause = if err.is::<tower::timeout::error::Elapsed>() {
        PaymentError::network("Request timed out")
    } else {
        PaymentError::provider(err.to_string())
    };

    let flow_error = match uri.path() {
        "/create-subscription" => PaymentFlowError::SubscriptionCreationFailed(cause),
        "/cancel-subscription" => PaymentFlowError::CancellationFailed(cause),
        "/coupon-validator" => PaymentFlowError::CouponUnavailable(Some(cause)),
        "/create-charge" => PaymentFlowError::ChargeFailed(cause),
        "/charge-status" => PaymentFlowError::ChargeStatusUnavailable(cause),
        "/subscription-status" => PaymentFlowError::SubscriptionStatusUnavailable(cause),
        path => {
            tracing::warn!(%path, error = %err, "Request timed out");
            return StatusCode::REQUEST_TIMEOUT.into_response();
        }
    };

    PaymentApiError(flow_error).into_response()
}

/// API error wrapper that converts flow errors to HTTP responses.
///
/// The page script reads the body, so failures are still answered with
/// 200 and `ok: false`.
#[derive(Debug)]
pub struct PaymentApiError(pub PaymentFlowError);

impl From<PaymentFlowError> for PaymentApiError {
    fn from(err: PaymentFlowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.cause() {
            Some(cause) => tracing::warn!(
                error = %err,
                error_code = %cause.code,
                retryable = cause.retryable,
                "Payment request failed"
            ),
            None => tracing::debug!(error = %err, "Payment request rejected"),
        }

        Json(ApiResponse::failure(err.user_message())).into_response()
    }
}
