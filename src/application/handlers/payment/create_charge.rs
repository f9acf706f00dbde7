//! CreateChargeHandler - Command handler for the one-off demo purchase.

use std::sync::Arc;

use crate::domain::payment::{ChargeId, PaymentToken, CHARGE_CURRENCY, DEMO_CHARGE_AMOUNT};
use crate::ports::{CreateChargeRequest, PaymentGateway};

use super::{present, PaymentFlowError};

/// Command to charge a card for the demo product.
///
/// The amount is fixed server-side and cannot be supplied by the client.
#[derive(Debug, Clone, Default)]
pub struct CreateChargeCommand {
    pub email: Option<String>,
    pub token: Option<String>,
}

/// Result of a successful charge.
#[derive(Debug, Clone)]
pub struct CreateChargeResult {
    pub charge_id: ChargeId,
    /// Minor units.
    pub amount: i64,
}

/// Handler for one-off charges.
pub struct CreateChargeHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateChargeHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateChargeCommand,
    ) -> Result<CreateChargeResult, PaymentFlowError> {
        let token = present(cmd.token).ok_or(PaymentFlowError::MissingToken)?;

        let charge_id = self
            .gateway
            .create_charge(CreateChargeRequest {
                email: present(cmd.email),
                source: PaymentToken::new(token),
                amount: DEMO_CHARGE_AMOUNT,
                currency: CHARGE_CURRENCY.to_string(),
            })
            .await
            .map_err(PaymentFlowError::ChargeFailed)?;

        tracing::info!(
            charge_id = %charge_id,
            amount = DEMO_CHARGE_AMOUNT,
            currency = CHARGE_CURRENCY,
            "Charge created"
        );

        Ok(CreateChargeResult {
            charge_id,
            amount: DEMO_CHARGE_AMOUNT,
        })
    }
}
