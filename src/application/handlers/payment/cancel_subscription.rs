//! CancelSubscriptionHandler - Command handler for cancelling subscriptions.

use std::sync::Arc;

use crate::domain::payment::SubscriptionId;
use crate::ports::{PaymentError, PaymentGateway};

use super::{present, PaymentFlowError};

/// Command to cancel a subscription immediately.
#[derive(Debug, Clone, Default)]
pub struct CancelSubscriptionCommand {
    pub subscription_id: Option<String>,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionResult {
    pub subscription_id: SubscriptionId,
}

/// Handler for cancelling subscriptions.
pub struct CancelSubscriptionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CancelSubscriptionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<CancelSubscriptionResult, PaymentFlowError> {
        let subscription_id = present(cmd.subscription_id)
            .map(SubscriptionId::new)
            .ok_or_else(|| {
                PaymentFlowError::CancellationFailed(PaymentError::invalid_request(
                    "Subscription id is required",
                ))
            })?;

        self.gateway
            .cancel_subscription(&subscription_id)
            .await
            .map_err(PaymentFlowError::CancellationFailed)?;

        tracing::info!(subscription_id = %subscription_id, "Subscription cancelled");

        Ok(CancelSubscriptionResult { subscription_id })
    }
}
