//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait over the Stripe REST API
//! (form-encoded requests, JSON responses, HTTP basic auth with the secret key).
//!
//! # Security
//!
//! - The secret key is held as `secrecy::SecretString` and only exposed while
//!   building the `Authorization` header
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::{PaymentConfig, DEFAULT_STRIPE_API_BASE_URL};
use crate::domain::payment::{ChargeId, Coupon, CouponCode, CustomerId, SubscriptionId};
use crate::ports::{
    CreateChargeRequest, CreateCustomerRequest, CreateSubscriptionRequest, PaymentError,
    PaymentErrorCode, PaymentGateway,
};

use super::api_types::{
    StripeCharge, StripeCoupon, StripeCustomer, StripeErrorResponse, StripeSubscription,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_STRIPE_API_BASE_URL.to_string(),
        }
    }

    /// Build from the application's payment settings.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self::new(config.stripe_secret_key.clone()).with_base_url(config.api_base_url())
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment gateway adapter.
///
/// Implements `PaymentGateway` for Stripe API integration.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create an adapter sharing an existing HTTP client.
    pub fn with_client(config: StripeConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Build `<base>/v1/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PaymentError> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::invalid_request(format!("Invalid Stripe base URL: {}", e))
        })?;

        url.path_segments_mut()
            .map_err(|_| PaymentError::invalid_request("Stripe base URL cannot carry a path"))?
            .pop_if_empty()
            .push("v1")
            .extend(segments);

        Ok(url)
    }

    /// Send an authenticated request and decode the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, PaymentError> {
        let response = request
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| log_failure(operation, PaymentError::network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(log_failure(operation, error_from_response(status, &error_text)));
        }

        response.json::<T>().await.map_err(|e| {
            log_failure(
                operation,
                PaymentError::provider(format!("Failed to parse Stripe response: {}", e)),
            )
        })
    }
}

/// Reject empty identifiers before they turn into a different endpoint.
fn require_id(operation: &'static str, field: &str, value: &str) -> Result<(), PaymentError> {
    if value.is_empty() {
        return Err(log_failure(
            operation,
            PaymentError::invalid_request(format!("{} is required", field)),
        ));
    }
    Ok(())
}

fn log_failure(operation: &'static str, err: PaymentError) -> PaymentError {
    match err.code {
        PaymentErrorCode::Authentication
        | PaymentErrorCode::PermissionDenied
        | PaymentErrorCode::Provider => tracing::error!(
            operation,
            error_code = %err.code,
            provider_code = ?err.provider_code,
            error = %err.message,
            "Stripe call failed"
        ),
        _ => tracing::warn!(
            operation,
            error_code = %err.code,
            provider_code = ?err.provider_code,
            error = %err.message,
            "Stripe call failed"
        ),
    }
    err
}

/// Categorize a non-2xx Stripe response.
///
/// The HTTP status gives the baseline; the error envelope's `type` refines it.
fn error_from_response(status: StatusCode, body: &str) -> PaymentError {
    let api_error = serde_json::from_str::<StripeErrorResponse>(body)
        .map(|r| r.error)
        .unwrap_or_default();

    let by_status = match status.as_u16() {
        400 => PaymentErrorCode::InvalidRequest,
        401 => PaymentErrorCode::Authentication,
        402 => PaymentErrorCode::CardDeclined,
        403 => PaymentErrorCode::PermissionDenied,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimited,
        500..=599 => PaymentErrorCode::Provider,
        _ => PaymentErrorCode::Unknown,
    };

    let code = match (api_error.error_type.as_deref(), by_status) {
        (_, PaymentErrorCode::NotFound) => PaymentErrorCode::NotFound,
        (Some("card_error"), _) => PaymentErrorCode::CardDeclined,
        (Some("rate_limit_error"), _) => PaymentErrorCode::RateLimited,
        (Some("authentication_error"), _) => PaymentErrorCode::Authentication,
        (Some("api_error"), _) => PaymentErrorCode::Provider,
        (Some("invalid_request_error"), _)
            if api_error.code.as_deref() == Some("resource_missing") =>
        {
            PaymentErrorCode::NotFound
        }
        (Some("invalid_request_error"), _) => PaymentErrorCode::InvalidRequest,
        (_, code) => code,
    };

    let message = api_error
        .message
        .unwrap_or_else(|| format!("Stripe API error (HTTP {})", status.as_u16()));

    let error = PaymentError::new(code, message);
    match api_error.decline_code.or(api_error.code) {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentAdapter {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerId, PaymentError> {
        const OP: &str = "create_customer";
        require_id(OP, "Payment token", request.source.as_str())?;
        let url = self.endpoint(&["customers"])?;

        let mut params = Vec::new();
        if let Some(email) = request.email.as_deref().filter(|e| !e.is_empty()) {
            params.push(("description", format!("Customer for {}", email)));
            params.push(("email", email.to_string()));
        }
        params.push(("source", request.source.into_inner()));

        let customer: StripeCustomer = self
            .execute(OP, self.http_client.post(url).form(&params))
            .await?;

        tracing::debug!(customer_id = %customer.id, "Stripe customer created");
        Ok(CustomerId::new(customer.id))
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<SubscriptionId, PaymentError> {
        const OP: &str = "create_subscription";
        require_id(OP, "Customer", request.customer_id.as_str())?;
        require_id(OP, "Plan", &request.plan)?;
        let url = self.endpoint(&["subscriptions"])?;

        let mut params = vec![
            ("customer", request.customer_id.to_string()),
            ("items[0][price]", request.plan.clone()),
        ];

        if let Some(coupon) = request.effective_coupon() {
            params.push(("discounts[0][coupon]", coupon.to_string()));
        }

        let subscription: StripeSubscription = self
            .execute(OP, self.http_client.post(url).form(&params))
            .await?;

        tracing::debug!(
            subscription_id = %subscription.id,
            status = %subscription.status,
            "Stripe subscription created"
        );
        Ok(SubscriptionId::new(subscription.id))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<(), PaymentError> {
        const OP: &str = "cancel_subscription";
        require_id(OP, "Subscription", subscription_id.as_str())?;
        let url = self.endpoint(&["subscriptions", subscription_id.as_str()])?;

        let subscription: StripeSubscription =
            self.execute(OP, self.http_client.delete(url)).await?;

        tracing::debug!(
            subscription_id = %subscription.id,
            status = %subscription.status,
            canceled_at = ?subscription.canceled_at,
            "Stripe subscription cancelled"
        );
        Ok(())
    }

    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError> {
        const OP: &str = "retrieve_coupon";
        require_id(OP, "Coupon code", code.as_str())?;
        let url = self.endpoint(&["coupons", code.as_str()])?;

        let coupon: StripeCoupon = self.execute(OP, self.http_client.get(url)).await?;
        Ok(coupon.into())
    }

    async fn create_charge(&self, request: CreateChargeRequest) -> Result<ChargeId, PaymentError> {
        const OP: &str = "create_charge";
        require_id(OP, "Payment token", request.source.as_str())?;
        if request.amount <= 0 {
            return Err(log_failure(
                OP,
                PaymentError::invalid_request("Charge amount must be positive"),
            ));
        }
        let url = self.endpoint(&["charges"])?;

        let mut params = vec![
            ("amount", request.amount.to_string()),
            ("currency", request.currency.clone()),
        ];
        if let Some(email) = request.email.as_deref().filter(|e| !e.is_empty()) {
            params.push(("description", format!("Charge for {}", email)));
        }
        params.push(("source", request.source.into_inner()));

        let charge: StripeCharge = self
            .execute(OP, self.http_client.post(url).form(&params))
            .await?;

        tracing::debug!(
            charge_id = %charge.id,
            status = %charge.status,
            paid = charge.paid,
            "Stripe charge created"
        );
        Ok(ChargeId::new(charge.id))
    }

    async fn charge_status(&self, charge_id: &ChargeId) -> Result<String, PaymentError> {
        const OP: &str = "charge_status";
        require_id(OP, "Charge", charge_id.as_str())?;
        let url = self.endpoint(&["charges", charge_id.as_str()])?;

        let charge: StripeCharge = self.execute(OP, self.http_client.get(url)).await?;
        Ok(charge.status)
    }

    async fn subscription_status(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<String, PaymentError> {
        const OP: &str = "subscription_status";
        require_id(OP, "Subscription", subscription_id.as_str())?;
        let url = self.endpoint(&["subscriptions", subscription_id.as_str()])?;

        let subscription: StripeSubscription =
            self.execute(OP, self.http_client.get(url)).await?;
        Ok(subscription.status)
    }
}
