//! HTTP adapter for the payment forms.
//!
//! Pages:
//! - `GET /` - Landing page
//! - `GET /subscription` - Subscription page
//! - `GET /charge` - One-off purchase page
//!
//! Form endpoints (form-encoded, answer `{ ok, message }`):
//! - `POST /create-subscription`
//! - `POST /cancel-subscription`
//! - `POST /coupon-validator`
//! - `POST /create-charge`
//! - `POST /charge-status`
//! - `POST /subscription-status`

pub mod dto;
pub mod handlers;
pub mod pages;
pub mod routes;

pub use dto::*;
pub use handlers::{PaymentApiError, PaymentAppState};
pub use routes::{page_routes, payment_app, payment_router, payment_routes};
