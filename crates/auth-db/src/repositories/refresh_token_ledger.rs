//! PostgreSQL implementation of RefreshTokenLedger

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;

use auth_common::fingerprint_token;
use auth_core::{PrincipalId, RefreshTokenLedger, RefreshTokenRecord, RepoResult};

use crate::models::RefreshTokenModel;

use super::error::map_db_error;

const TOKEN_COLUMNS: &str =
    "id, owner_id, token_fingerprint, issued_at, expires_at, revoked_at, superseded_by";

/// PostgreSQL implementation of RefreshTokenLedger
#[derive(Clone)]
pub struct PgRefreshTokenLedger {
    pool: PgPool,
}

impl PgRefreshTokenLedger {
    /// Create a new PgRefreshTokenLedger
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenLedger for PgRefreshTokenLedger {
    #[instrument(skip(self, raw_token))]
    async fn record(
        &self,
        owner_id: PrincipalId,
        raw_token: &str,
        ttl: Duration,
    ) -> RepoResult<RefreshTokenRecord> {
        let now = Utc::now();
        let model = sqlx::query_as::<_, RefreshTokenModel>(&format!(
            r"
            INSERT INTO refresh_tokens (owner_id, token_fingerprint, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {TOKEN_COLUMNS}
            "
        ))
        .bind(owner_id)
        .bind(fingerprint_token(raw_token))
        .bind(now)
        .bind(now + ttl)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(RefreshTokenRecord::from(model))
    }

    #[instrument(skip(self, raw_token))]
    async fn validate(&self, raw_token: &str) -> RepoResult<Option<RefreshTokenRecord>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(&format!(
            r"
            SELECT {TOKEN_COLUMNS}
            FROM refresh_tokens
            WHERE token_fingerprint = $1
            "
        ))
        .bind(fingerprint_token(raw_token))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result
            .map(RefreshTokenRecord::from)
            .filter(RefreshTokenRecord::is_valid))
    }

    #[instrument(skip(self, old_raw_token, new_raw_token))]
    async fn rotate(
        &self,
        old_raw_token: &str,
        new_raw_token: &str,
        ttl: Duration,
    ) -> RepoResult<Option<RefreshTokenRecord>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent rotations of the same token; the
        // loser re-reads after commit and finds the row already revoked.
        let old = sqlx::query_as::<_, RefreshTokenModel>(&format!(
            r"
            SELECT {TOKEN_COLUMNS}
            FROM refresh_tokens
            WHERE token_fingerprint = $1 AND revoked_at IS NULL AND expires_at > NOW()
            FOR UPDATE
            "
        ))
        .bind(fingerprint_token(old_raw_token))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(old) = old else {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        };

        let now = Utc::now();
        let successor = sqlx::query_as::<_, RefreshTokenModel>(&format!(
            r"
            INSERT INTO refresh_tokens (owner_id, token_fingerprint, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {TOKEN_COLUMNS}
            "
        ))
        .bind(old.owner_id)
        .bind(fingerprint_token(new_raw_token))
        .bind(now)
        .bind(now + ttl)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), superseded_by = $2
            WHERE id = $1
            ",
        )
        .bind(old.id)
        .bind(successor.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(RefreshTokenRecord::from(successor)))
    }

    #[instrument(skip(self, raw_token))]
    async fn revoke_one(&self, raw_token: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_fingerprint = $1 AND revoked_at IS NULL
            ",
        )
        .bind(fingerprint_token(raw_token))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke_all(&self, owner_id: PrincipalId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE owner_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn sweep_expired(&self, before: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM refresh_tokens
            WHERE expires_at < $1
            ",
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_active(&self, owner_id: PrincipalId) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM refresh_tokens
            WHERE owner_id = $1 AND revoked_at IS NULL AND expires_at > NOW()
            ",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_ledger_is_send_sync() {
        assert_send_sync::<PgRefreshTokenLedger>();
    }
}
