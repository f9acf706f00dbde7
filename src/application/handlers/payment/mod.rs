//! Payment flow handlers.
//!
//! One handler per form action. Each validates what the browser submitted,
//! calls the `PaymentGateway` port, and maps failures onto `PaymentFlowError`.

mod cancel_subscription;
mod charge_status;
mod create_charge;
mod create_subscription;
mod errors;
mod subscription_status;
mod validate_coupon;

pub use cancel_subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
};
pub use charge_status::{ChargeStatusHandler, ChargeStatusQuery, ChargeStatusResult};
pub use create_charge::{CreateChargeCommand, CreateChargeHandler, CreateChargeResult};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use errors::PaymentFlowError;
pub use subscription_status::{
    SubscriptionStatusHandler, SubscriptionStatusQuery, SubscriptionStatusResult,
};
pub use validate_coupon::{ValidateCouponHandler, ValidateCouponQuery, ValidateCouponResult};

/// Form fields arrive as optional strings; blank counts as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
