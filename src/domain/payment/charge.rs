//! One-off charge constants.

/// Price of the demo product in minor units ($9.99).
pub const DEMO_CHARGE_AMOUNT: i64 = 999;

/// Charges are always taken in US dollars.
pub const CHARGE_CURRENCY: &str = "usd";
