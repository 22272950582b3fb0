//! Authentication types for the domain layer.
//!
//! These types represent a caller whose bearer token was validated by a
//! `SessionValidator`. They carry no provider-specific data, so any token
//! issuer can populate them.
//!
//! Being authenticated says nothing about the caller's role: admin checks
//! go through the `AdminAuthorizer` port.

use super::ProfileId;
use thiserror::Error;

/// Authenticated caller extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Profile identifier taken from the token subject.
    pub id: ProfileId,

    /// Email claim, when the issuer provides one.
    pub email: Option<String>,

    /// Display name claim, when present.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: ProfileId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    /// Name to seed a fresh profile with: display name, then the email's
    /// local part.
    pub fn suggested_username(&self) -> Option<String> {
        self.display_name.clone().or_else(|| {
            self.email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
