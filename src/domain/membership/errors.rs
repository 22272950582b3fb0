//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | StoreUnavailable | 503 |
//! | Unauthorized | 403 |
//! | InvalidRole | 400 |
//! | ValidationFailed | 400 |

use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, ValidationError};

/// Membership lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Profile id does not resolve to a record.
    NotFound(ProfileId),

    /// The profile store could not be read or written.
    StoreUnavailable(String),

    /// Caller is not allowed to perform an admin-only operation.
    Unauthorized,

    /// Role value outside `user`, `vip`, `admin`.
    InvalidRole(String),

    /// Malformed input rejected before any store call.
    ValidationFailed { field: String, message: String },
}

impl MembershipError {
    pub fn not_found(id: ProfileId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        MembershipError::StoreUnavailable(message.into())
    }

    pub fn unauthorized() -> Self {
        MembershipError::Unauthorized
    }

    pub fn invalid_role(value: impl Into<String>) -> Self {
        MembershipError::InvalidRole(value.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) => ErrorCode::ProfileNotFound,
            MembershipError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            MembershipError::Unauthorized => ErrorCode::Unauthorized,
            MembershipError::InvalidRole(_) => ErrorCode::InvalidRole,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Profile not found: {}", id),
            MembershipError::StoreUnavailable(msg) => {
                format!("Profile store unavailable: {}", msg)
            }
            MembershipError::Unauthorized => {
                "Admin role is required for this operation".to_string()
            }
            MembershipError::InvalidRole(value) => {
                format!("Invalid role '{}': expected user, vip or admin", value)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }

    /// Returns true if the operation may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MembershipError::StoreUnavailable(_))
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ProfileNotFound => match err
                .details
                .get("profile_id")
                .and_then(|id| ProfileId::new(id.as_str()).ok())
            {
                Some(id) => MembershipError::NotFound(id),
                None => MembershipError::StoreUnavailable(err.message),
            },
            ErrorCode::InvalidRole => MembershipError::InvalidRole(err.message),
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::Unauthorized => MembershipError::Unauthorized,
            _ => MembershipError::StoreUnavailable(err.message),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
