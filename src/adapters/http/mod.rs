//! HTTP adapters - browser-facing pages and form endpoints.

pub mod payment;

pub use payment::{payment_app, payment_router};
pub use payment::{ApiResponse, PaymentApiError, PaymentAppState};
