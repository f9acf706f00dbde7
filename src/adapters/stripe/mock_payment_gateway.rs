//! Mock payment gateway for testing.
//!
//! Provides a configurable mock implementation of `PaymentGateway` for unit
//! and integration tests. Supports:
//! - Pre-configured coupons and statuses
//! - Error injection per method
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::payment::{ChargeId, Coupon, CouponCode, CustomerId, SubscriptionId};
use crate::ports::{
    CreateChargeRequest, CreateCustomerRequest, CreateSubscriptionRequest, PaymentError,
    PaymentGateway,
};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.set_method_error("create_charge", PaymentError::card_declined("Test decline"));
///
/// let result = mock.create_charge(request).await;
/// assert!(mock.was_called("create_charge"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    coupons: HashMap<String, Coupon>,
    charge_statuses: HashMap<String, String>,
    subscription_statuses: HashMap<String, String>,
    method_errors: HashMap<String, PaymentError>,
    latency: Option<Duration>,
    customer_requests: Vec<CreateCustomerRequest>,
    subscription_requests: Vec<CreateSubscriptionRequest>,
    charge_requests: Vec<CreateChargeRequest>,
    call_log: Vec<MethodCall>,
    sequence: u32,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway where every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Make a coupon retrievable by its id.
    pub fn add_coupon(&self, coupon: Coupon) {
        self.state()
            .coupons
            .insert(coupon.id.as_str().to_string(), coupon);
    }

    /// Status reported for a charge id.
    pub fn set_charge_status(&self, charge_id: &str, status: &str) {
        self.state()
            .charge_statuses
            .insert(charge_id.to_string(), status.to_string());
    }

    /// Status reported for a subscription id.
    pub fn set_subscription_status(&self, subscription_id: &str, status: &str) {
        self.state()
            .subscription_statuses
            .insert(subscription_id.to_string(), status.to_string());
    }

    /// Fail every call to `method` with `error`.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Delay every call by `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        self.state().method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn customer_requests(&self) -> Vec<CreateCustomerRequest> {
        self.state().customer_requests.clone()
    }

    pub fn subscription_requests(&self) -> Vec<CreateSubscriptionRequest> {
        self.state().subscription_requests.clone()
    }

    pub fn charge_requests(&self) -> Vec<CreateChargeRequest> {
        self.state().charge_requests.clone()
    }

    /// Record a call and return the injected error for it, if any.
    async fn simulate_latency(&self) {
        let latency = self.state().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn record(&self, method: &str, args: Vec<String>) -> Result<u32, PaymentError> {
        let mut state = self.state();
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }
        state.sequence += 1;
        Ok(state.sequence)
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerId, PaymentError> {
        self.simulate_latency().await;
        let seq = self.record(
            "create_customer",
            vec![
                request.email.clone().unwrap_or_default(),
                request.source.to_string(),
            ],
        )?;
        self.state().customer_requests.push(request);
        Ok(CustomerId::new(format!("cus_mock_{}", seq)))
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<SubscriptionId, PaymentError> {
        self.simulate_latency().await;
        let seq = self.record(
            "create_subscription",
            vec![request.customer_id.to_string(), request.plan.clone()],
        )?;
        self.state().subscription_requests.push(request);
        Ok(SubscriptionId::new(format!("sub_mock_{}", seq)))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<(), PaymentError> {
        self.simulate_latency().await;
        self.record("cancel_subscription", vec![subscription_id.to_string()])?;
        self.state()
            .subscription_statuses
            .insert(subscription_id.to_string(), "canceled".to_string());
        Ok(())
    }

    async fn retrieve_coupon(&self, code: &CouponCode) -> Result<Coupon, PaymentError> {
        self.simulate_latency().await;
        self.record("retrieve_coupon", vec![code.to_string()])?;
        self.state()
            .coupons
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Coupon"))
    }

    async fn create_charge(&self, request: CreateChargeRequest) -> Result<ChargeId, PaymentError> {
        self.simulate_latency().await;
        let seq = self.record(
            "create_charge",
            vec![request.amount.to_string(), request.currency.clone()],
        )?;
        self.state().charge_requests.push(request);
        Ok(ChargeId::new(format!("ch_mock_{}", seq)))
    }

    async fn charge_status(&self, charge_id: &ChargeId) -> Result<String, PaymentError> {
        self.simulate_latency().await;
        self.record("charge_status", vec![charge_id.to_string()])?;
        self.state()
            .charge_statuses
            .get(charge_id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Charge"))
    }

    async fn subscription_status(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<String, PaymentError> {
        self.simulate_latency().await;
        self.record("subscription_status", vec![subscription_id.to_string()])?;
        self.state()
            .subscription_statuses
            .get(subscription_id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Subscription"))
    }
}
