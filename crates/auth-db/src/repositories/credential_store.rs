//! PostgreSQL implementation of CredentialStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use auth_core::{CredentialStore, DomainError, NewPrincipal, Principal, PrincipalId, RepoResult};

use crate::models::PrincipalModel;

use super::error::{map_db_error, map_principal_conflict};

const PRINCIPAL_COLUMNS: &str = "id, email, username, password_hash, status, failed_attempts, \
     locked_until, last_login_at, created_at, updated_at";

/// PostgreSQL implementation of CredentialStore
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new PgCredentialStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PrincipalId) -> RepoResult<Option<Principal>> {
        let result = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            SELECT {PRINCIPAL_COLUMNS}
            FROM principals
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Principal::from))
    }

    #[instrument(skip(self))]
    async fn find_by_identifier(&self, identifier: &str) -> RepoResult<Option<Principal>> {
        let result = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            SELECT {PRINCIPAL_COLUMNS}
            FROM principals
            WHERE LOWER(email) = LOWER($1) OR LOWER(username) = LOWER($1)
            "
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Principal::from))
    }

    #[instrument(skip(self, new))]
    async fn create(&self, new: &NewPrincipal) -> RepoResult<Principal> {
        let model = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            INSERT INTO principals (email, username, password_hash, status)
            VALUES ($1, $2, $3, 'active')
            RETURNING {PRINCIPAL_COLUMNS}
            "
        ))
        .bind(&new.email)
        .bind(&new.username)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_principal_conflict)?;

        Ok(Principal::from(model))
    }

    #[instrument(skip(self))]
    async fn record_failed_attempt(
        &self,
        id: PrincipalId,
        lock_until: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET failed_attempts = failed_attempts + 1,
                locked_until = COALESCE($2, locked_until),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(lock_until)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PrincipalNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset_attempts(&self, id: PrincipalId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET failed_attempts = 0, locked_until = NULL, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PrincipalNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: PrincipalId, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET last_login_at = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PrincipalNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_store_is_send_sync() {
        assert_send_sync::<PgCredentialStore>();
    }
}
