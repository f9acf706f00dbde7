//! HTTP listener settings

use http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `request_timeout_secs`; Stripe calls rarely take longer than a few seconds.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the form server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, IP literal only
    pub host: String,

    pub port: u16,

    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,

    /// Applies to the whole request, Stripe round trip included
    pub request_timeout_secs: u64,

    /// Comma-separated origins allowed to post to the form endpoints
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Which cross-origin callers may post to the form endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// No origins configured; only the pages this server renders can post.
    SameOrigin,
    /// A lone `*`.
    Any,
    List(Vec<HeaderValue>),
}

impl ServerConfig {
    /// Address handed to the TCP listener.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Production logs go to a collector, so they are emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.is_production()
    }

    /// Trimmed, non-empty CORS origins. Empty when cross-origin posts are not allowed.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    /// Parsed CORS policy. `*` is only allowed on its own.
    pub fn cors_policy(&self) -> Result<CorsOrigins, ValidationError> {
        let origins = self.cors_origins_list();
        if origins.is_empty() {
            return Ok(CorsOrigins::SameOrigin);
        }
        if origins.iter().any(|origin| origin == "*") {
            if origins.len() == 1 {
                return Ok(CorsOrigins::Any);
            }
            return Err(ValidationError::InvalidCorsOrigin("*".to_string()));
        }

        origins
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin)
                    .map_err(|_| ValidationError::InvalidCorsOrigin(origin))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(CorsOrigins::List)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.cors_policy()?;
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,stripe_forms=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}
