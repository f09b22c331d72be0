//! Domain errors

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::PrincipalId;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Authentication outcomes
    // =========================================================================
    /// Bad identifier/password, inactive account, or an unknown/expired/
    /// revoked refresh token. Intentionally coarse to prevent enumeration.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is locked until {locked_until}")]
    AccountLocked { locked_until: DateTime<Utc> },

    // =========================================================================
    // Token verification outcomes
    // =========================================================================
    #[error("Token is malformed or has an invalid signature")]
    TokenMalformed,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    // =========================================================================
    // Not Found / Conflict
    // =========================================================================
    #[error("Principal not found: {0}")]
    PrincipalNotFound(PrincipalId),

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    // =========================================================================
    // Validation
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Infrastructure (always fails closed)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    /// Error code for API responses and audit records
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountLocked { .. } => "ACCOUNT_LOCKED",
            Self::TokenMalformed => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::PrincipalNotFound(_) => "NOT_FOUND",
            Self::EmailAlreadyExists | Self::UsernameAlreadyExists => "ALREADY_EXISTS",
            Self::ValidationError(_) | Self::WeakPassword(_) => "VALIDATION_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Check if this error collapses to an Unauthorized at the boundary
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::TokenMalformed | Self::TokenExpired | Self::TokenRevoked
        )
    }

    /// Check if this error is an infrastructure failure
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(DomainError::TokenRevoked.code(), "TOKEN_REVOKED");
        assert_eq!(
            DomainError::StoreUnavailable("timeout".to_string()).code(),
            "STORE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(DomainError::InvalidCredentials.is_unauthorized());
        assert!(DomainError::TokenExpired.is_unauthorized());
        assert!(!DomainError::AccountLocked { locked_until: Utc::now() }.is_unauthorized());
        assert!(!DomainError::StoreUnavailable("down".to_string()).is_unauthorized());
    }
}
