//! Payment configuration

use serde::Deserialize;
use std::fmt;

use super::error::ValidationError;

/// Default Stripe API endpoint.
pub const DEFAULT_STRIPE_API_BASE_URL: &str = "https://api.stripe.com";

/// Payment configuration (Stripe)
#[derive(Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe publishable key, handed to the browser
    pub stripe_public_key: String,

    /// Stripe secret API key, server-only
    pub stripe_secret_key: String,

    /// Override for the Stripe API endpoint (stripe-mock, proxies)
    pub stripe_api_base_url: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_test_") || self.stripe_secret_key.starts_with("rk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_live_") || self.stripe_secret_key.starts_with("rk_live_")
    }

    /// Stripe API base URL, falling back to the public endpoint
    pub fn api_base_url(&self) -> &str {
        self.stripe_api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_STRIPE_API_BASE_URL)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_public_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PUBLIC_KEY"));
        }
        if self.stripe_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }

        // A publishable key is rendered into HTML, keep it to the documented alphabet
        if !self.stripe_public_key.starts_with("pk_")
            || !self
                .stripe_public_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidStripePublicKey);
        }
        if !self.stripe_secret_key.starts_with("sk_") && !self.stripe_secret_key.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeSecretKey);
        }

        let public_is_test = self.stripe_public_key.starts_with("pk_test_");
        let public_is_live = self.stripe_public_key.starts_with("pk_live_");
        if (public_is_test && self.is_live_mode()) || (public_is_live && self.is_test_mode()) {
            return Err(ValidationError::StripeKeyModeMismatch);
        }

        if let Some(url) = &self.stripe_api_base_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidStripeBaseUrl);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("stripe_public_key", &self.stripe_public_key)
            .field("stripe_secret_key", &"[REDACTED]")
            .field("stripe_api_base_url", &self.stripe_api_base_url)
            .finish()
    }
}
