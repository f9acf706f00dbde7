//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Customer, subscription, coupon and charge operations

mod payment_gateway;

pub use payment_gateway::{
    CreateChargeRequest, CreateCustomerRequest, CreateSubscriptionRequest, PaymentError,
    PaymentErrorCode, PaymentGateway,
};
