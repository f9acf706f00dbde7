//! Application configuration
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file) under the `STRIPE_FORMS` prefix, with `__` between nesting levels:
//!
//! - `STRIPE_FORMS__SERVER__PORT=8080` sets `server.port`
//! - `STRIPE_FORMS__PAYMENT__STRIPE_SECRET_KEY=sk_test_...` sets `payment.stripe_secret_key`
//!
//! ```no_run
//! use stripe_forms::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("invalid configuration");
//! println!("listening on {:?}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::{PaymentConfig, DEFAULT_STRIPE_API_BASE_URL};
pub use server::{CorsOrigins, Environment, ServerConfig, MAX_REQUEST_TIMEOUT_SECS};

use serde::Deserialize;

const ENV_PREFIX: &str = "STRIPE_FORMS";
const ENV_SEPARATOR: &str = "__";

/// Root configuration. Only the Stripe key pair is mandatory.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Read `.env` (if any) and the process environment.
    ///
    /// Fails when the Stripe keys are absent or a value does not parse. Call
    /// [`validate`](Self::validate) afterwards, or use
    /// [`load_validated`](Self::load_validated).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(env_source())
    }

    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    fn from_source(source: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
}
