//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Stripe integration, including:
//! - Customer creation with a Stripe.js token as source
//! - Subscription creation, cancellation and status lookup
//! - One-off charges and charge status lookup
//! - Coupon retrieval
//!
//! # Configuration
//!
//! Required settings (see `config::PaymentConfig`):
//! - `STRIPE_FORMS__PAYMENT__STRIPE_SECRET_KEY`: Stripe secret API key

mod api_types;
mod mock_payment_gateway;
mod stripe_adapter;

pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
