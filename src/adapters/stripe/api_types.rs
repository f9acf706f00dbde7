//! Stripe API objects as returned by the REST endpoints.
//!
//! Only the fields this service reads are required; everything else is
//! optional so that partial fixtures and newer API versions both parse.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{Coupon, CouponCode, CouponDuration};

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Subscription status (incomplete, incomplete_expired, trialing, active,
    /// past_due, canceled, unpaid, paused).
    pub status: String,

    /// When cancellation was requested (Unix timestamp).
    pub canceled_at: Option<i64>,
}

/// Stripe Charge object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCharge {
    /// Unique charge identifier (ch_...).
    pub id: String,

    /// Charge status (succeeded, pending, failed).
    pub status: String,

    /// Whether the charge has been paid.
    #[serde(default)]
    pub paid: bool,
}

/// Stripe Coupon object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCoupon {
    /// Coupon identifier; this is the code customers type.
    pub id: String,

    /// False once the coupon expired or hit its redemption limit.
    pub valid: bool,

    /// Percentage discount.
    pub percent_off: Option<f64>,

    /// Fixed discount in minor units.
    pub amount_off: Option<i64>,

    /// Currency of `amount_off`.
    pub currency: Option<String>,

    /// How long the discount applies.
    pub duration: CouponDuration,

    /// Months the discount applies, for `repeating` coupons.
    pub duration_in_months: Option<i64>,
}

impl From<StripeCoupon> for Coupon {
    fn from(coupon: StripeCoupon) -> Self {
        Coupon {
            id: CouponCode::new(coupon.id),
            valid: coupon.valid,
            percent_off: coupon.percent_off,
            amount_off: coupon.amount_off,
            currency: coupon.currency,
            duration: coupon.duration,
            duration_in_months: coupon.duration_in_months,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Body Stripe returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

/// Details of a Stripe API error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeApiError {
    /// Error type (api_error, card_error, idempotency_error, invalid_request_error, ...).
    #[serde(rename = "type")]
    pub error_type: Option<String>,

    /// Short machine code, e.g. `resource_missing`.
    pub code: Option<String>,

    /// Issuer decline reason for card errors.
    pub decline_code: Option<String>,

    /// Human-readable message.
    pub message: Option<String>,
}
