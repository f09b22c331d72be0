//! Application error types
//!
//! Unified error handling for the entire application.

use auth_core::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is locked")]
    AccountLocked { locked_until: DateTime<Utc> },

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Missing authentication")]
    MissingAuth,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    ///
    /// Store failures always map to 5xx - an unavailable store fails closed
    /// and is never presented as an authentication outcome.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::TokenRevoked
            | Self::MissingAuth => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict
            Self::Conflict(_) => 409,

            // 423 Locked
            Self::AccountLocked { .. } => 423,

            // 500 Internal Server Error
            Self::Database(_) | Self::Cache(_) | Self::Internal(_) | Self::Config(_) => 500,

            Self::Domain(e) => match e {
                DomainError::AccountLocked { .. } => 423,
                DomainError::PrincipalNotFound(_) => 404,
                DomainError::EmailAlreadyExists | DomainError::UsernameAlreadyExists => 409,
                DomainError::ValidationError(_) | DomainError::WeakPassword(_) => 400,
                DomainError::StoreUnavailable(_) => 500,
                _ if e.is_unauthorized() => 401,
                _ => 500,
            },
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountLocked { .. } => "ACCOUNT_LOCKED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        let status = self.status_code();
        (400..500).contains(&status)
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
///
/// `locked_until` is populated only for account-locked errors so clients can
/// back off intelligently; every other failure stays generically worded.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let locked_until = match err {
            AppError::AccountLocked { locked_until } => Some(*locked_until),
            AppError::Domain(DomainError::AccountLocked { locked_until }) => Some(*locked_until),
            _ => None,
        };
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            locked_until,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::TokenRevoked.status_code(), 401);
        assert_eq!(
            AppError::AccountLocked { locked_until: Utc::now() }.status_code(),
            423
        );
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Cache("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_error_mapping() {
        assert_eq!(AppError::Domain(DomainError::InvalidCredentials).status_code(), 401);
        assert_eq!(AppError::Domain(DomainError::TokenExpired).status_code(), 401);
        assert_eq!(
            AppError::Domain(DomainError::StoreUnavailable("timeout".to_string())).status_code(),
            500
        );
        assert_eq!(
            AppError::Domain(DomainError::AccountLocked { locked_until: Utc::now() }).status_code(),
            423
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(
            AppError::AccountLocked { locked_until: Utc::now() }.error_code(),
            "ACCOUNT_LOCKED"
        );
        assert_eq!(AppError::TokenExpired.error_code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn test_is_client_error() {
        assert!(AppError::InvalidCredentials.is_client_error());
        assert!(AppError::AccountLocked { locked_until: Utc::now() }.is_client_error());
        assert!(!AppError::Database("test".to_string()).is_client_error());
    }

    #[test]
    fn test_error_response_carries_lock_expiry() {
        let until = Utc::now();
        let response = ErrorResponse::from(AppError::AccountLocked { locked_until: until });
        assert_eq!(response.code, "ACCOUNT_LOCKED");
        assert_eq!(response.locked_until, Some(until));

        let response = ErrorResponse::from(AppError::InvalidCredentials);
        assert!(response.locked_until.is_none());
    }
}
