//! CreateSubscriptionHandler - Command handler for subscribing a new customer to a plan.

use std::sync::Arc;

use crate::domain::payment::{CouponCode, CustomerId, PaymentToken, SubscriptionId};
use crate::ports::{CreateCustomerRequest, CreateSubscriptionRequest, PaymentGateway};

use super::{present, PaymentFlowError};

/// Command to create a customer and subscribe them to a plan.
#[derive(Debug, Clone, Default)]
pub struct CreateSubscriptionCommand {
    pub email: Option<String>,
    /// Card token produced by the browser.
    pub token: Option<String>,
    pub plan: Option<String>,
    pub coupon: Option<String>,
}

/// Result of a successful subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub customer_id: CustomerId,
    pub subscription_id: SubscriptionId,
}

/// Handler for creating subscriptions.
///
/// A customer is created first with the card token as default source, then
/// subscribed. If the second call fails the customer is left in place.
pub struct CreateSubscriptionHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateSubscriptionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, PaymentFlowError> {
        // 1. Token and plan must both be present before touching the processor
        let (token, plan) = match (present(cmd.token), present(cmd.plan)) {
            (Some(token), Some(plan)) => (token, plan),
            _ => return Err(PaymentFlowError::MissingToken),
        };
        let email = present(cmd.email);

        // 2. Create the customer
        let customer_id = self
            .gateway
            .create_customer(CreateCustomerRequest {
                email,
                source: PaymentToken::new(token),
            })
            .await
            .map_err(PaymentFlowError::CustomerCreationFailed)?;

        // 3. Subscribe the customer, with the coupon if one was entered
        let subscription_id = self
            .gateway
            .create_subscription(CreateSubscriptionRequest {
                customer_id: customer_id.clone(),
                plan: plan.clone(),
                coupon: present(cmd.coupon).map(CouponCode::new),
            })
            .await
            .map_err(PaymentFlowError::SubscriptionCreationFailed)?;

        tracing::info!(
            customer_id = %customer_id,
            subscription_id = %subscription_id,
            plan = %plan,
            "Subscription created"
        );

        Ok(CreateSubscriptionResult {
            customer_id,
            subscription_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentGateway;
    use crate::ports::{PaymentError, PaymentErrorCode};

    fn command() -> CreateSubscriptionCommand {
        CreateSubscriptionCommand {
            email: Some("jane@example.com".to_string()),
            token: Some("tok_visa".to_string()),
            plan: Some("plan_basic".to_string()),
            coupon: None,
        }
    }

    fn handler(mock: &MockPaymentGateway) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn creates_customer_then_subscription() {
        let mock = MockPaymentGateway::new();

        let result = handler(&mock).handle(command()).await.unwrap();

        assert!(result.subscription_id.as_str().starts_with("sub_mock_"));
        let customers = mock.customer_requests();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].email.as_deref(), Some("jane@example.com"));
        assert_eq!(customers[0].source.as_str(), "tok_visa");

        let subscriptions = mock.subscription_requests();
        assert_eq!(subscriptions[0].customer_id, result.customer_id);
        assert_eq!(subscriptions[0].plan, "plan_basic");
        assert!(subscriptions[0].coupon.is_none());
    }

    #[tokio::test]
    async fn coupon_is_forwarded_when_entered() {
        let mock = MockPaymentGateway::new();
        let cmd = CreateSubscriptionCommand {
            coupon: Some("SPRING20".to_string()),
            ..command()
        };

        handler(&mock).handle(cmd).await.unwrap();

        let subscriptions = mock.subscription_requests();
        assert_eq!(
            subscriptions[0].coupon.as_ref().map(|c| c.as_str()),
            Some("SPRING20")
        );
    }

    #[tokio::test]
    async fn empty_coupon_is_dropped() {
        let mock = MockPaymentGateway::new();
        let cmd = CreateSubscriptionCommand {
            coupon: Some(String::new()),
            ..command()
        };

        handler(&mock).handle(cmd).await.unwrap();

        assert!(mock.subscription_requests()[0].coupon.is_none());
    }

    #[tokio::test]
    async fn missing_token_makes_no_calls() {
        let mock = MockPaymentGateway::new();
        let cmd = CreateSubscriptionCommand {
            token: None,
            ..command()
        };

        let err = handler(&mock).handle(cmd).await.unwrap_err();

        assert_eq!(err, PaymentFlowError::MissingToken);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_plan_is_treated_as_missing() {
        let mock = MockPaymentGateway::new();
        let cmd = CreateSubscriptionCommand {
            plan: Some(String::new()),
            ..command()
        };

        let err = handler(&mock).handle(cmd).await.unwrap_err();

        assert_eq!(err, PaymentFlowError::MissingToken);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn customer_failure_skips_subscription() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error("create_customer", PaymentError::card_declined("Declined"));

        let err = handler(&mock).handle(command()).await.unwrap_err();

        assert!(matches!(err, PaymentFlowError::CustomerCreationFailed(_)));
        assert_eq!(err.error_code(), Some(PaymentErrorCode::CardDeclined));
        assert!(!mock.was_called("create_subscription"));
    }

    #[tokio::test]
    async fn subscription_failure_is_reported() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error(
            "create_subscription",
            PaymentError::invalid_request("No such plan"),
        );

        let err = handler(&mock).handle(command()).await.unwrap_err();

        assert!(matches!(err, PaymentFlowError::SubscriptionCreationFailed(_)));
        assert_eq!(mock.call_count("create_customer"), 1);
    }
}
