//! Error handling utilities for repositories

use auth_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

/// Map a unique violation to the column that caused it. Postgres reports
/// the violated constraint name, which carries the column for our indexes.
pub fn map_principal_conflict(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint.contains("username") {
                return DomainError::UsernameAlreadyExists;
            }
            return DomainError::EmailAlreadyExists;
        }
    }
    DomainError::StoreUnavailable(e.to_string())
}
