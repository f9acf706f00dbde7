//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates payment operations and coordinates between ports.
//! Commands (subscribe, cancel, charge) are kept apart from queries (coupon
//! and status lookups).

pub mod handlers;

pub use handlers::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
    ChargeStatusHandler, ChargeStatusQuery, ChargeStatusResult, CreateChargeCommand,
    CreateChargeHandler, CreateChargeResult, CreateSubscriptionCommand, CreateSubscriptionHandler,
    CreateSubscriptionResult, PaymentFlowError, SubscriptionStatusHandler, SubscriptionStatusQuery,
    SubscriptionStatusResult, ValidateCouponHandler, ValidateCouponQuery, ValidateCouponResult,
};
