//! Errors raised while running a payment flow.
//!
//! Every gateway failure is kept intact so callers can branch on its
//! category; `user_message` gives the fixed text shown on the page.

use thiserror::Error;

use crate::ports::{PaymentError, PaymentErrorCode};

pub const MISSING_TOKEN_MESSAGE: &str = "Stripe payment token is missing. Please, try again later.";
pub const CUSTOMER_FAILED_MESSAGE: &str = "An error occurred while trying to create a customer.";
pub const SUBSCRIPTION_FAILED_MESSAGE: &str =
    "An error occurred while trying to create a subscription.";
pub const CANCEL_FAILED_MESSAGE: &str = "Failed to cancel the subscription. Please, try later.";
pub const COUPON_UNAVAILABLE_MESSAGE: &str = "This coupon code is not available. This may be because it has expired or has already been applied to your account.";
pub const CHARGE_FAILED_MESSAGE: &str = "An error occurred while trying to create a charge.";
pub const CHARGE_STATUS_FAILED_MESSAGE: &str =
    "Unable to retrieve the charge status. Please, try later.";
pub const SUBSCRIPTION_STATUS_FAILED_MESSAGE: &str =
    "Unable to retrieve the subscription status. Please, try later.";

/// Payment flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentFlowError {
    /// Token (or plan) was not submitted; nothing was sent to the processor.
    #[error("Payment token is missing")]
    MissingToken,

    #[error("Customer creation failed: {0}")]
    CustomerCreationFailed(PaymentError),

    #[error("Subscription creation failed: {0}")]
    SubscriptionCreationFailed(PaymentError),

    #[error("Subscription cancellation failed: {0}")]
    CancellationFailed(PaymentError),

    /// Lookup failed, or the coupon exists but can no longer be redeemed.
    #[error("Coupon unavailable")]
    CouponUnavailable(Option<PaymentError>),

    #[error("Charge failed: {0}")]
    ChargeFailed(PaymentError),

    #[error("Charge status unavailable: {0}")]
    ChargeStatusUnavailable(PaymentError),

    #[error("Subscription status unavailable: {0}")]
    SubscriptionStatusUnavailable(PaymentError),
}

impl PaymentFlowError {
    /// The gateway failure behind this error, if one occurred.
    pub fn cause(&self) -> Option<&PaymentError> {
        match self {
            PaymentFlowError::MissingToken => None,
            PaymentFlowError::CouponUnavailable(cause) => cause.as_ref(),
            PaymentFlowError::CustomerCreationFailed(e)
            | PaymentFlowError::SubscriptionCreationFailed(e)
            | PaymentFlowError::CancellationFailed(e)
            | PaymentFlowError::ChargeFailed(e)
            | PaymentFlowError::ChargeStatusUnavailable(e)
            | PaymentFlowError::SubscriptionStatusUnavailable(e) => Some(e),
        }
    }

    /// Category of the underlying gateway failure.
    pub fn error_code(&self) -> Option<PaymentErrorCode> {
        self.cause().map(|e| e.code)
    }

    /// Returns true if submitting the same form again could succeed.
    pub fn is_retryable(&self) -> bool {
        self.cause().map(|e| e.retryable).unwrap_or(false)
    }

    /// Fixed, customer-facing message for the failed operation.
    pub fn user_message(&self) -> &'static str {
        match self {
            PaymentFlowError::MissingToken => MISSING_TOKEN_MESSAGE,
            PaymentFlowError::CustomerCreationFailed(_) => CUSTOMER_FAILED_MESSAGE,
            PaymentFlowError::SubscriptionCreationFailed(_) => SUBSCRIPTION_FAILED_MESSAGE,
            PaymentFlowError::CancellationFailed(_) => CANCEL_FAILED_MESSAGE,
            PaymentFlowError::CouponUnavailable(_) => COUPON_UNAVAILABLE_MESSAGE,
            PaymentFlowError::ChargeFailed(_) => CHARGE_FAILED_MESSAGE,
            PaymentFlowError::ChargeStatusUnavailable(_) => CHARGE_STATUS_FAILED_MESSAGE,
            PaymentFlowError::SubscriptionStatusUnavailable(_) => {
                SUBSCRIPTION_STATUS_FAILED_MESSAGE
            }
        }
    }
}
