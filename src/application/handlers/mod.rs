//! Application handlers.
//!
//! Command and query handlers that orchestrate the payment flows.

pub mod payment;

pub use payment::{
    // Commands and queries
    CancelSubscriptionCommand, ChargeStatusQuery, CreateChargeCommand, CreateSubscriptionCommand,
    SubscriptionStatusQuery, ValidateCouponQuery,
    // Handlers
    CancelSubscriptionHandler, ChargeStatusHandler, CreateChargeHandler,
    CreateSubscriptionHandler, SubscriptionStatusHandler, ValidateCouponHandler,
    // Results
    CancelSubscriptionResult, ChargeStatusResult, CreateChargeResult, CreateSubscriptionResult,
    SubscriptionStatusResult, ValidateCouponResult,
    // Errors
    PaymentFlowError,
};
