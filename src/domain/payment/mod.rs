//! Payment domain module.
//!
//! Everything durable (customers, subscriptions, charges, coupons) is owned by
//! the payment processor. This module only holds the opaque handles to those
//! objects and the few rules applied locally.
//!
//! # Module Structure
//!
//! - `ids` - Opaque identifier newtypes
//! - `coupon` - Coupon data and discount formatting
//! - `charge` - Fixed charge amount and currency

mod charge;
mod coupon;
mod ids;

pub use charge::{CHARGE_CURRENCY, DEMO_CHARGE_AMOUNT};
pub use coupon::{Coupon, CouponDuration, Discount};
pub use ids::{ChargeId, CouponCode, CustomerId, PaymentToken, SubscriptionId};
