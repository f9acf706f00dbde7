//! HTTP DTOs (Data Transfer Objects) for the payment forms.
//!
//! Requests are form-encoded by the page scripts. Every field is optional so
//! a missing field reaches the application layer as `None` instead of being
//! rejected by the extractor.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::{
    CancelSubscriptionCommand, ChargeStatusQuery, CreateChargeCommand, CreateSubscriptionCommand,
    SubscriptionStatusQuery, ValidateCouponQuery,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Subscription form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSubscriptionForm {
    pub email: Option<String>,
    /// Stripe.js card token.
    pub token: Option<String>,
    pub plan: Option<String>,
    pub coupon: Option<String>,
}

impl From<CreateSubscriptionForm> for CreateSubscriptionCommand {
    fn from(form: CreateSubscriptionForm) -> Self {
        Self {
            email: form.email,
            token: form.token,
            plan: form.plan,
            coupon: form.coupon,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelSubscriptionForm {
    pub subscription_id: Option<String>,
}

impl From<CancelSubscriptionForm> for CancelSubscriptionCommand {
    fn from(form: CancelSubscriptionForm) -> Self {
        Self {
            subscription_id: form.subscription_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CouponForm {
    pub code: Option<String>,
}

impl From<CouponForm> for ValidateCouponQuery {
    fn from(form: CouponForm) -> Self {
        Self { code: form.code }
    }
}

/// One-off purchase form. Any amount field the client sends is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateChargeForm {
    pub email: Option<String>,
    pub token: Option<String>,
}

impl From<CreateChargeForm> for CreateChargeCommand {
    fn from(form: CreateChargeForm) -> Self {
        Self {
            email: form.email,
            token: form.token,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargeStatusForm {
    pub charge_id: Option<String>,
}

impl From<ChargeStatusForm> for ChargeStatusQuery {
    fn from(form: ChargeStatusForm) -> Self {
        Self {
            charge_id: form.charge_id,
        }
    }
}

/// The page posts the subscription id under `subscriptionStatus`;
/// `subscriptionId` is read when that one is blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionStatusForm {
    #[serde(rename = "subscriptionStatus")]
    pub subscription_status: Option<String>,

    #[serde(rename = "subscriptionId")]
    pub subscription_id: Option<String>,
}

impl From<SubscriptionStatusForm> for SubscriptionStatusQuery {
    fn from(form: SubscriptionStatusForm) -> Self {
        let subscription_id = form
            .subscription_status
            .filter(|id| !id.trim().is_empty())
            .or(form.subscription_id);
        Self { subscription_id }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of every form endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}
