//! Authentication configuration
//!
//! Tokens are issued by the hosting platform and signed with a shared HS256
//! secret; this service only verifies them.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_SECRET_LEN: usize = 32;

/// Session token verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared JWT signing secret
    pub jwt_secret: SecretString,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Tolerated clock skew in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("VIP_LIFECYCLE__AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("VIP_LIFECYCLE__AUTH__AUDIENCE"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            audience: default_audience(),
            leeway_secs: default_leeway(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.audience, "authenticated");
        assert_eq!(config.leeway_secs, 30);
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("VIP_LIFECYCLE__AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_short_secret() {
        let config = AuthConfig {
            jwt_secret: secret("too-short"),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::JwtSecretTooShort));
    }

    #[test]
    fn test_validation_empty_audience() {
        let config = AuthConfig {
            jwt_secret: secret("0123456789abcdef0123456789abcdef"),
            audience: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            jwt_secret: secret("0123456789abcdef0123456789abcdef"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            jwt_secret: secret("0123456789abcdef0123456789abcdef"),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("0123456789abcdef"));
    }
}
