//! Access token blacklist in Redis.
//!
//! Revoked access tokens stay valid cryptographically until they expire, so
//! revocation is a membership set keyed by token with a TTL equal to the
//! token's remaining lifetime. Once the token would have expired anyway the
//! entry evicts itself and the set stays bounded.

use async_trait::async_trait;
use tracing::instrument;

use auth_core::{DomainError, RepoResult, RevocationCache};

use crate::pool::RedisPool;

/// Key prefix for blacklisted tokens
pub const BLACKLIST_PREFIX: &str = "blacklist:token:";

/// Marker value stored under each blacklisted token key
const REVOKED_MARKER: &str = "revoked";

/// Redis-backed revocation blacklist
#[derive(Debug, Clone)]
pub struct TokenBlacklist {
    pool: RedisPool,
}

impl TokenBlacklist {
    /// Create a new token blacklist
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a token identifier
    fn key(token_id: &str) -> String {
        format!("{BLACKLIST_PREFIX}{token_id}")
    }

    fn map_cache_error(e: crate::pool::RedisPoolError) -> DomainError {
        DomainError::StoreUnavailable(e.to_string())
    }
}

#[async_trait]
impl RevocationCache for TokenBlacklist {
    #[instrument(skip(self, token_id))]
    async fn add(&self, token_id: &str, ttl_seconds: u64) -> RepoResult<()> {
        // SETEX rejects a zero TTL; an already-expired token needs no entry
        if ttl_seconds == 0 {
            return Ok(());
        }

        let key = Self::key(token_id);
        self.pool
            .set(&key, &REVOKED_MARKER, Some(ttl_seconds))
            .await
            .map_err(Self::map_cache_error)?;

        tracing::debug!(ttl_seconds, "Token blacklisted");

        Ok(())
    }

    #[instrument(skip(self, token_id))]
    async fn contains(&self, token_id: &str) -> RepoResult<bool> {
        let key = Self::key(token_id);
        self.pool.exists(&key).await.map_err(Self::map_cache_error)
    }

    #[instrument(skip(self, token_id))]
    async fn remove(&self, token_id: &str) -> RepoResult<()> {
        let key = Self::key(token_id);
        self.pool.delete(&key).await.map_err(Self::map_cache_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(
            TokenBlacklist::key("abc123"),
            "blacklist:token:abc123"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_blacklist_is_send_sync() {
        assert_send_sync::<TokenBlacklist>();
    }
}
