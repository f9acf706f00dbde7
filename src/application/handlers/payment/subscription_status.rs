//! SubscriptionStatusHandler - Query handler for a subscription's current status.

use std::sync::Arc;

use crate::domain::payment::SubscriptionId;
use crate::ports::{PaymentError, PaymentGateway};

use super::{present, PaymentFlowError};

#[derive(Debug, Clone, Default)]
pub struct SubscriptionStatusQuery {
    pub subscription_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubscriptionStatusResult {
    pub subscription_id: SubscriptionId,
    /// Processor status string, e.g. `active` or `canceled`.
    pub status: String,
}

pub struct SubscriptionStatusHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl SubscriptionStatusHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: SubscriptionStatusQuery,
    ) -> Result<SubscriptionStatusResult, PaymentFlowError> {
        let subscription_id = present(query.subscription_id)
            .map(SubscriptionId::new)
            .ok_or_else(|| {
                PaymentFlowError::SubscriptionStatusUnavailable(PaymentError::invalid_request(
                    "Subscription id is required",
                ))
            })?;

        let status = self
            .gateway
            .subscription_status(&subscription_id)
            .await
            .map_err(PaymentFlowError::SubscriptionStatusUnavailable)?;

        Ok(SubscriptionStatusResult {
            subscription_id,
            status,
        })
    }
}
