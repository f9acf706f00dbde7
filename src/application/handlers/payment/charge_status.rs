//! ChargeStatusHandler - Query handler for a charge's current status.

use std::sync::Arc;

use crate::domain::payment::ChargeId;
use crate::ports::{PaymentError, PaymentGateway};

use super::{present, PaymentFlowError};

#[derive(Debug, Clone, Default)]
pub struct ChargeStatusQuery {
    pub charge_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChargeStatusResult {
    pub charge_id: ChargeId,
    /// Processor status string, passed through verbatim.
    pub status: String,
}

pub struct ChargeStatusHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ChargeStatusHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: ChargeStatusQuery,
    ) -> Result<ChargeStatusResult, PaymentFlowError> {
        let charge_id = present(query.charge_id).map(ChargeId::new).ok_or_else(|| {
            PaymentFlowError::ChargeStatusUnavailable(PaymentError::invalid_request(
                "Charge id is required",
            ))
        })?;

        let status = self
            .gateway
            .charge_status(&charge_id)
            .await
            .map_err(PaymentFlowError::ChargeStatusUnavailable)?;

        Ok(ChargeStatusResult { charge_id, status })
    }
}
