//! Opaque identifiers handed out by the payment processor.
//!
//! None of these are parsed or validated beyond emptiness; their structure
//! belongs to Stripe.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Stripe customer id (`cus_...`).
    CustomerId
);

opaque_id!(
    /// Stripe subscription id (`sub_...`).
    SubscriptionId
);

opaque_id!(
    /// Stripe charge id (`ch_...`).
    ChargeId
);

opaque_id!(
    /// Coupon code as typed by the customer; doubles as the Stripe coupon id.
    CouponCode
);

opaque_id!(
    /// One-time payment token produced by Stripe.js (`tok_...`).
    PaymentToken
);
