//! Domain layer containing the payment types and the few local rules.
//!
//! # Module Organization
//!
//! - `payment` - Opaque processor identifiers, coupons, charge constants

pub mod payment;
