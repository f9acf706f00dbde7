//! Payment gateway port for the external payment processor.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! Every operation maps to exactly one remote call; nothing is cached,
//! batched or retried.
//!
//! # Design
//!
//! - **Explicit failures**: every error keeps its category so callers can
//!   tell a declined card from an outage
//! - **Opaque ids**: identifiers are passed through untouched

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{
    ChargeId, Coupon, CouponCode, CustomerId, PaymentToken, SubscriptionId,
};

/// Port for payment processor integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a customer with a payment source attached.
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerId, PaymentError>;

    /// Subscribe an existing customer to a plan.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<SubscriptionId, PaymentError>;

    /// Cancel a subscription immediately.
    async fn cancel_subscription(&self, subscription_id: &SubscriptionId)
        -> Result<(), PaymentError>;

    /// Look up a coupon by code.
    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError>;

    /// Take a one-off payment.
    async fn create_charge(&self, request: CreateChargeRequest) -> Result<ChargeId, PaymentError>;

    /// Current processor status of a charge (`succeeded`, `pending`, `failed`).
    async fn charge_status(&self, charge_id: &ChargeId) -> Result<String, PaymentError>;

    /// Current processor status of a subscription (`active`, `past_due`, ...).
    async fn subscription_status(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<String, PaymentError>;
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer email address, omitted from the call when absent.
    pub email: Option<String>,

    /// Payment token to attach as the default source.
    pub source: PaymentToken,
}

/// Request to create a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub customer_id: CustomerId,

    /// Plan (or price) identifier.
    pub plan: String,

    /// Optional coupon; an empty code is treated as absent.
    pub coupon: Option<CouponCode>,
}

impl CreateSubscriptionRequest {
    /// Coupon to send, if any.
    pub fn effective_coupon(&self) -> Option<&CouponCode> {
        self.coupon.as_ref().filter(|code| !code.is_empty())
    }
}

/// Request to create a one-off charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChargeRequest {
    pub email: Option<String>,

    pub source: PaymentToken,

    /// Amount in minor currency units.
    pub amount: i64,

    /// ISO currency code, lowercase.
    pub currency: String,
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation could succeed if tried again.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Attach the provider's error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Network, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Authentication, message)
    }

    /// Create a card declined error.
    pub fn card_declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::CardDeclined, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::RateLimited, message)
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Provider, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Parameters rejected by the provider, or a local precondition failed.
    InvalidRequest,

    /// API authentication failed.
    Authentication,

    /// Key lacks permission for the operation.
    PermissionDenied,

    /// Card was declined.
    CardDeclined,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimited,

    /// Network connectivity issue.
    Network,

    /// Provider-side failure or unreadable response.
    Provider,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::Network | PaymentErrorCode::RateLimited)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::Authentication => "authentication_error",
            PaymentErrorCode::PermissionDenied => "permission_denied",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimited => "rate_limited",
            PaymentErrorCode::Network => "network_error",
            PaymentErrorCode::Provider => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
