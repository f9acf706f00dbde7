//! ValidateCouponHandler - Query handler for checking a coupon code before checkout.

use std::sync::Arc;

use crate::domain::payment::{Coupon, CouponCode};
use crate::ports::{PaymentError, PaymentGateway};

use super::{present, PaymentFlowError};

/// Query for a coupon's redeemability.
#[derive(Debug, Clone, Default)]
pub struct ValidateCouponQuery {
    pub code: Option<String>,
}

/// A redeemable coupon and its summary.
#[derive(Debug, Clone)]
pub struct ValidateCouponResult {
    pub coupon: Coupon,
    /// e.g. `20% OFF repeating`.
    pub description: String,
}

/// Handler for coupon validation.
pub struct ValidateCouponHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ValidateCouponHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: ValidateCouponQuery,
    ) -> Result<ValidateCouponResult, PaymentFlowError> {
        let code = present(query.code).map(CouponCode::new).ok_or_else(|| {
            PaymentFlowError::CouponUnavailable(Some(PaymentError::invalid_request(
                "Coupon code is required",
            )))
        })?;

        let coupon = self
            .gateway
            .retrieve_coupon(&code)
            .await
            .map_err(|e| PaymentFlowError::CouponUnavailable(Some(e)))?;

        let description = coupon.describe().ok_or_else(|| {
            tracing::debug!(coupon = %code, valid = coupon.valid, "Coupon not redeemable");
            PaymentFlowError::CouponUnavailable(None)
        })?;

        Ok(ValidateCouponResult {
            coupon,
            description,
        })
    }
}
