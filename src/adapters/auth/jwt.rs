//! Shared-secret JWT adapter for session validation.
//!
//! The hosting platform signs access tokens with HS256 using a project
//! secret. This adapter verifies the signature, audience and expiry and
//! maps the claims to an `AuthenticatedUser`:
//!
//! - `sub` becomes the profile id
//! - `email` is carried through when present
//! - `user_metadata.username`, then `user_metadata.full_name`, becomes the
//!   display name
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::new(JwtConfig {
//!     secret: SecretString::new("project-jwt-secret".into()),
//!     audience: "authenticated".to_string(),
//!     leeway_secs: 30,
//! });
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, ProfileId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret shared with the auth platform.
    pub secret: SecretString,

    /// Expected `aud` claim.
    pub audience: String,

    /// Clock skew tolerated on `exp`.
    pub leeway_secs: u64,
}

/// Claims issued by the hosting platform.
#[derive(Debug, Serialize, Deserialize)]
struct PlatformClaims {
    sub: String,
    exp: i64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

/// HS256 session validator.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = decode::<PlatformClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?
            .claims;

        let profile_id = ProfileId::new(claims.sub.as_str()).map_err(|_| {
            tracing::warn!("Invalid subject in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let metadata = claims.user_metadata.unwrap_or_default();
        Ok(AuthenticatedUser::new(
            profile_id,
            claims.email,
            metadata.username.or(metadata.full_name),
        ))
    }
}
