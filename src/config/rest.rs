//! REST profile store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Settings for the PostgREST-compatible profile endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RestConfig {
    /// Project base URL (without `/rest/v1`)
    pub base_url: String,

    /// Service-role key sent as both `apikey` and bearer token
    pub service_key: SecretString,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RestConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate REST store configuration
    ///
    /// Production requires HTTPS since the service key travels in headers.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("VIP_LIFECYCLE__REST__BASE_URL"));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidRestUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::RestUrlMustBeHttps);
        }
        if self.service_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("VIP_LIFECYCLE__REST__SERVICE_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            service_key: SecretString::new(String::new()),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
