//! Store traits (ports) - define the interface for persistence and caching
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method is a synchronous I/O boundary;
//! implementations must fail closed (an error is never treated as success).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::entities::{Principal, PrincipalId, RefreshTokenRecord};
use crate::error::DomainError;

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Fields required to provision a principal
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

// ============================================================================
// Credential Store
// ============================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a principal by id
    async fn find_by_id(&self, id: PrincipalId) -> RepoResult<Option<Principal>>;

    /// Find a principal by email or username in a single case-insensitive
    /// match across both fields
    async fn find_by_identifier(&self, identifier: &str) -> RepoResult<Option<Principal>>;

    /// Provision a new principal (out-of-scope path, but the seam lives here)
    async fn create(&self, new: &NewPrincipal) -> RepoResult<Principal>;

    /// Record one failed attempt; when `lock_until` is set, the failure
    /// crossed the threshold and the lock expiry is persisted with it
    async fn record_failed_attempt(
        &self,
        id: PrincipalId,
        lock_until: Option<DateTime<Utc>>,
    ) -> RepoResult<()>;

    /// Reset the failed-attempt counter and clear any lock
    async fn reset_attempts(&self, id: PrincipalId) -> RepoResult<()>;

    /// Record a successful login timestamp
    async fn record_login(&self, id: PrincipalId, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Refresh Token Ledger
// ============================================================================

#[async_trait]
pub trait RefreshTokenLedger: Send + Sync {
    /// Fingerprint `raw_token` and insert a row valid for `ttl`
    async fn record(
        &self,
        owner_id: PrincipalId,
        raw_token: &str,
        ttl: Duration,
    ) -> RepoResult<RefreshTokenRecord>;

    /// Fingerprint lookup; `None` if no row exists or the row is expired
    /// or revoked. The ledger is the authority, not the token's signature.
    async fn validate(&self, raw_token: &str) -> RepoResult<Option<RefreshTokenRecord>>;

    /// Atomically revoke the old token and insert its successor. Returns
    /// `None` (and inserts nothing) when the old token is already invalid,
    /// so a captured dead token can never mint a fresh live one. Exactly one
    /// of two concurrent rotations for the same token wins.
    async fn rotate(
        &self,
        old_raw_token: &str,
        new_raw_token: &str,
        ttl: Duration,
    ) -> RepoResult<Option<RefreshTokenRecord>>;

    /// Revoke a single token by fingerprint; a miss is not an error
    async fn revoke_one(&self, raw_token: &str) -> RepoResult<()>;

    /// Revoke every unrevoked token owned by `owner_id` in one set-based
    /// update; returns the number of rows revoked
    async fn revoke_all(&self, owner_id: PrincipalId) -> RepoResult<u64>;

    /// Delete rows expired before `before`; storage hygiene only
    async fn sweep_expired(&self, before: DateTime<Utc>) -> RepoResult<u64>;

    /// Count live tokens for an owner
    async fn count_active(&self, owner_id: PrincipalId) -> RepoResult<i64>;
}

// ============================================================================
// Revocation Cache
// ============================================================================

#[async_trait]
pub trait RevocationCache: Send + Sync {
    /// Blacklist a token identifier for `ttl_seconds`. Upsert: adding an
    /// already-present id refreshes the TTL, never errors. Callers derive
    /// the TTL from the token's own remaining lifetime.
    async fn add(&self, token_id: &str, ttl_seconds: u64) -> RepoResult<()>;

    /// Membership check
    async fn contains(&self, token_id: &str) -> RepoResult<bool>;

    /// Drop an entry early
    async fn remove(&self, token_id: &str) -> RepoResult<()>;
}
