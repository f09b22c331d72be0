//! Service context - dependency container for services
//!
//! Holds the stores, signer, and policy needed by the authentication flows.
//! Dependencies are injected through the constructor or builder; there is no
//! global registry.

use std::sync::Arc;

use auth_cache::{RedisPool, TokenBlacklist};
use auth_common::Signer;
use auth_core::{CredentialStore, LockoutPolicy, RefreshTokenLedger, RevocationCache};
use auth_db::{PgCredentialStore, PgPool, PgRefreshTokenLedger};

use super::audit::AuditSender;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Provides access to:
/// - The credential store (principals and attempt counters)
/// - The refresh token ledger (rotation and revocation)
/// - The revocation cache (access token blacklist)
/// - The token signer and lockout policy
/// - An optional audit event sink
#[derive(Clone)]
pub struct ServiceContext {
    credential_store: Arc<dyn CredentialStore>,
    token_ledger: Arc<dyn RefreshTokenLedger>,
    revocation_cache: Arc<dyn RevocationCache>,
    signer: Arc<Signer>,
    lockout_policy: LockoutPolicy,
    audit_sender: Option<AuditSender>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        token_ledger: Arc<dyn RefreshTokenLedger>,
        revocation_cache: Arc<dyn RevocationCache>,
        signer: Arc<Signer>,
        lockout_policy: LockoutPolicy,
    ) -> Self {
        Self {
            credential_store,
            token_ledger,
            revocation_cache,
            signer,
            lockout_policy,
            audit_sender: None,
        }
    }

    /// Wire the context from PostgreSQL and Redis pools
    pub fn from_pools(
        pg_pool: PgPool,
        redis_pool: RedisPool,
        signer: Arc<Signer>,
        lockout_policy: LockoutPolicy,
    ) -> Self {
        Self::new(
            Arc::new(PgCredentialStore::new(pg_pool.clone())),
            Arc::new(PgRefreshTokenLedger::new(pg_pool)),
            Arc::new(TokenBlacklist::new(redis_pool)),
            signer,
            lockout_policy,
        )
    }

    /// Attach an audit event sink
    #[must_use]
    pub fn with_audit_sender(mut self, sender: AuditSender) -> Self {
        self.audit_sender = Some(sender);
        self
    }

    /// Get the credential store
    pub fn credential_store(&self) -> &dyn CredentialStore {
        self.credential_store.as_ref()
    }

    /// Get the refresh token ledger
    pub fn token_ledger(&self) -> &dyn RefreshTokenLedger {
        self.token_ledger.as_ref()
    }

    /// Get the revocation cache
    pub fn revocation_cache(&self) -> &dyn RevocationCache {
        self.revocation_cache.as_ref()
    }

    /// Get the token signer
    pub fn signer(&self) -> &Signer {
        self.signer.as_ref()
    }

    /// Get the lockout policy
    pub fn lockout_policy(&self) -> &LockoutPolicy {
        &self.lockout_policy
    }

    /// Get the audit sink, if attached
    pub fn audit_sender(&self) -> Option<&AuditSender> {
        self.audit_sender.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("signer", &self.signer)
            .field("lockout_policy", &self.lockout_policy)
            .field("audit_sender", &self.audit_sender.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    credential_store: Option<Arc<dyn CredentialStore>>,
    token_ledger: Option<Arc<dyn RefreshTokenLedger>>,
    revocation_cache: Option<Arc<dyn RevocationCache>>,
    signer: Option<Arc<Signer>>,
    lockout_policy: Option<LockoutPolicy>,
    audit_sender: Option<AuditSender>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    pub fn token_ledger(mut self, ledger: Arc<dyn RefreshTokenLedger>) -> Self {
        self.token_ledger = Some(ledger);
        self
    }

    pub fn revocation_cache(mut self, cache: Arc<dyn RevocationCache>) -> Self {
        self.revocation_cache = Some(cache);
        self
    }

    pub fn signer(mut self, signer: Arc<Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn lockout_policy(mut self, policy: LockoutPolicy) -> Self {
        self.lockout_policy = Some(policy);
        self
    }

    pub fn audit_sender(mut self, sender: AuditSender) -> Self {
        self.audit_sender = Some(sender);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let mut ctx = ServiceContext::new(
            self.credential_store
                .ok_or_else(|| ServiceError::validation("credential_store is required"))?,
            self.token_ledger
                .ok_or_else(|| ServiceError::validation("token_ledger is required"))?,
            self.revocation_cache
                .ok_or_else(|| ServiceError::validation("revocation_cache is required"))?,
            self.signer
                .ok_or_else(|| ServiceError::validation("signer is required"))?,
            self.lockout_policy.unwrap_or_default(),
        );
        ctx.audit_sender = self.audit_sender;
        Ok(ctx)
    }
}
