//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `stripe` - Stripe REST API gateway (and an in-memory mock)
//! - `http` - axum pages and form endpoints

pub mod http;
pub mod stripe;

pub use http::{payment_app, payment_router, PaymentAppState};
pub use stripe::{MockPaymentGateway, StripeConfig, StripePaymentAdapter};
