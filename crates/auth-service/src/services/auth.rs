//! Authentication service
//!
//! Coordinates the credential store, refresh token ledger, revocation cache,
//! signer, and lockout policy into the login, refresh, logout, and request
//! authentication flows. Failure ordering in `authenticate` is fixed:
//! lookup, lock gate, status gate, then password verification, so a locked
//! account rejects even a correct password.

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};

use auth_common::{
    fingerprint_token, hash_password, validate_password_strength, verify_password, TokenKind,
};
use auth_core::{DomainError, LockoutDecision, NewPrincipal, PrincipalId};

use crate::dto::{
    AuthenticatedPrincipal, CreatePrincipalRequest, LoginRequest, LogoutRequest,
    PrincipalResponse, RefreshRequest, TokenResponse,
};

use super::audit::{emit, AuditEvent};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authenticate with identifier and password, issuing a token pair
    #[instrument(skip(self, request), fields(identifier = %request.identifier))]
    pub async fn authenticate(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let now = Utc::now();

        let principal = self
            .ctx
            .credential_store()
            .find_by_identifier(&request.identifier)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown identifier");
                ServiceError::Domain(DomainError::InvalidCredentials)
            })?;

        // Lock gate runs before the password is ever checked
        let decision = self.ctx.lockout_policy().check(&principal, now);
        if let LockoutDecision::Locked { until } = decision {
            warn!(principal_id = principal.id, "Login rejected: account locked");
            emit(
                self.ctx.audit_sender(),
                AuditEvent::LoginRejectedLocked {
                    principal_id: principal.id,
                    locked_until: until,
                },
            );
            return Err(ServiceError::Domain(DomainError::AccountLocked {
                locked_until: until,
            }));
        }

        if !principal.is_active() {
            warn!(principal_id = principal.id, "Login failed: account inactive");
            return Err(ServiceError::Domain(DomainError::InvalidCredentials));
        }

        let password_ok = verify_password(&request.password, &principal.password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !password_ok {
            return Err(self.record_failure(principal.id, decision).await?);
        }

        self.ctx
            .credential_store()
            .reset_attempts(principal.id)
            .await?;
        self.ctx
            .credential_store()
            .record_login(principal.id, now)
            .await?;

        let pair = self
            .ctx
            .signer()
            .issue_pair(principal.id, &principal.username, &principal.email)?;
        self.ctx
            .token_ledger()
            .record(
                principal.id,
                &pair.refresh_token,
                Duration::seconds(self.ctx.signer().refresh_token_expiry()),
            )
            .await?;

        info!(principal_id = principal.id, "Login succeeded");
        emit(
            self.ctx.audit_sender(),
            AuditEvent::LoginSucceeded {
                principal_id: principal.id,
            },
        );

        Ok(TokenResponse::from(pair))
    }

    /// Record a failed attempt and produce the resulting error
    async fn record_failure(
        &self,
        principal_id: PrincipalId,
        decision: LockoutDecision,
    ) -> ServiceResult<ServiceError> {
        match decision {
            LockoutDecision::WouldLock { until } => {
                self.ctx
                    .credential_store()
                    .record_failed_attempt(principal_id, Some(until))
                    .await?;
                warn!(principal_id, %until, "Account locked after repeated failures");
                emit(
                    self.ctx.audit_sender(),
                    AuditEvent::AccountLocked {
                        principal_id,
                        locked_until: until,
                    },
                );
                Ok(ServiceError::Domain(DomainError::AccountLocked {
                    locked_until: until,
                }))
            }
            _ => {
                self.ctx
                    .credential_store()
                    .record_failed_attempt(principal_id, None)
                    .await?;
                warn!(principal_id, "Login failed: invalid password");
                emit(
                    self.ctx.audit_sender(),
                    AuditEvent::LoginFailed { principal_id },
                );
                Ok(ServiceError::Domain(DomainError::InvalidCredentials))
            }
        }
    }

    /// Rotate a refresh token, issuing a fresh pair
    ///
    /// Presenting a token the ledger no longer considers live (already
    /// rotated, revoked, or aged out) is rejected as revoked. The successor
    /// issued by the legitimate rotation stays valid.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshRequest) -> ServiceResult<TokenResponse> {
        let claims = self
            .ctx
            .signer()
            .verify_refresh_token(&request.refresh_token)?;

        // Defense in depth: a blacklisted fingerprint never rotates, even if
        // the ledger row were somehow still live
        if self
            .ctx
            .revocation_cache()
            .contains(&fingerprint_token(&request.refresh_token))
            .await?
        {
            warn!(principal_id = claims.principal_id, "Refresh rejected: blacklisted token");
            return Err(ServiceError::Domain(DomainError::TokenRevoked));
        }

        let principal = self
            .ctx
            .credential_store()
            .find_by_id(claims.principal_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::InvalidCredentials))?;

        if !principal.is_active() {
            warn!(principal_id = principal.id, "Refresh rejected: account inactive");
            return Err(ServiceError::Domain(DomainError::InvalidCredentials));
        }

        // Reject a dead token before minting its successor; the rotation
        // transaction below re-checks liveness under a row lock, so a
        // concurrent presenter can still lose there
        if self
            .ctx
            .token_ledger()
            .validate(&request.refresh_token)
            .await?
            .is_none()
        {
            return Err(self.reject_reused_token(principal.id));
        }

        let new_refresh = self.ctx.signer().issue(
            TokenKind::Refresh,
            principal.id,
            &principal.username,
            None,
        )?;

        let rotated = self
            .ctx
            .token_ledger()
            .rotate(
                &request.refresh_token,
                &new_refresh,
                Duration::seconds(self.ctx.signer().refresh_token_expiry()),
            )
            .await?;

        if rotated.is_none() {
            return Err(self.reject_reused_token(principal.id));
        }

        let access_token = self.ctx.signer().issue(
            TokenKind::Access,
            principal.id,
            &principal.username,
            Some(&principal.email),
        )?;

        info!(principal_id = principal.id, "Tokens refreshed");
        emit(
            self.ctx.audit_sender(),
            AuditEvent::TokenRefreshed {
                principal_id: principal.id,
            },
        );

        Ok(TokenResponse {
            access_token,
            refresh_token: new_refresh,
            token_type: "Bearer".to_string(),
            expires_in: self.ctx.signer().access_token_expiry(),
        })
    }

    /// Signature-valid but dead in the ledger: rotation reuse
    fn reject_reused_token(&self, principal_id: PrincipalId) -> ServiceError {
        warn!(principal_id, "Refresh token reuse detected");
        emit(
            self.ctx.audit_sender(),
            AuditEvent::RefreshReuseDetected { principal_id },
        );
        ServiceError::Domain(DomainError::TokenRevoked)
    }

    /// Log out: blacklist the access token and revoke refresh tokens
    ///
    /// With a refresh token present only that session's token is revoked;
    /// without one, every token of the owner. The access token may already
    /// be expired; its identity is still trusted for revocation. Repeating a
    /// logout is a no-op, not an error, and a token that cannot be verified
    /// at all names no session to end, so it succeeds without revoking
    /// anything.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<()> {
        let claims = match self.ctx.signer().verify_allow_expired(&request.access_token) {
            Ok(claims) if claims.is_access_token() => claims,
            Ok(_) | Err(_) => {
                debug!("Logout with unverifiable access token; nothing to revoke");
                return Ok(());
            }
        };

        self.ctx
            .revocation_cache()
            .add(
                &fingerprint_token(&request.access_token),
                claims.remaining_ttl_seconds(),
            )
            .await?;

        let all_sessions = match &request.refresh_token {
            Some(refresh_token) => {
                self.ctx.token_ledger().revoke_one(refresh_token).await?;
                false
            }
            None => {
                self.ctx
                    .token_ledger()
                    .revoke_all(claims.principal_id)
                    .await?;
                true
            }
        };

        info!(principal_id = claims.principal_id, all_sessions, "Logged out");
        emit(
            self.ctx.audit_sender(),
            AuditEvent::LoggedOut {
                principal_id: claims.principal_id,
                all_sessions,
            },
        );

        Ok(())
    }

    /// Log out of every session regardless of refresh token
    #[instrument(skip(self, access_token))]
    pub async fn logout_all(&self, access_token: &str) -> ServiceResult<()> {
        self.logout(LogoutRequest {
            access_token: access_token.to_string(),
            refresh_token: None,
        })
        .await
    }

    /// Authenticate a bearer token presented on a request
    ///
    /// The blacklist check runs before signature verification, so a revoked
    /// token is rejected as revoked even once it also expires.
    #[instrument(skip(self, access_token))]
    pub async fn authenticate_request(
        &self,
        access_token: &str,
    ) -> ServiceResult<AuthenticatedPrincipal> {
        if self
            .ctx
            .revocation_cache()
            .contains(&fingerprint_token(access_token))
            .await?
        {
            return Err(ServiceError::Domain(DomainError::TokenRevoked));
        }

        let claims = self.ctx.signer().verify_access_token(access_token)?;

        Ok(AuthenticatedPrincipal {
            principal_id: claims.principal_id,
            username: claims.sub,
            email: claims.email,
        })
    }

    /// Provision a new principal
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn create_principal(
        &self,
        request: CreatePrincipalRequest,
    ) -> ServiceResult<PrincipalResponse> {
        if request.email.trim().is_empty() || !request.email.contains('@') {
            return Err(ServiceError::validation("Invalid email format"));
        }
        if request.username.trim().is_empty() {
            return Err(ServiceError::validation("Username must not be empty"));
        }
        validate_password_strength(&request.password)?;

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let principal = self
            .ctx
            .credential_store()
            .create(&NewPrincipal {
                email: request.email,
                username: request.username,
                password_hash,
            })
            .await?;

        info!(principal_id = principal.id, "Principal created");
        emit(
            self.ctx.audit_sender(),
            AuditEvent::PrincipalCreated {
                principal_id: principal.id,
            },
        );

        Ok(PrincipalResponse::from(&principal))
    }

    /// Delete ledger rows whose expiry has passed; returns rows removed
    #[instrument(skip(self))]
    pub async fn purge_expired_tokens(&self) -> ServiceResult<u64> {
        let removed = self.ctx.token_ledger().sweep_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Purged expired refresh tokens");
        }
        Ok(removed)
    }

    /// Count live refresh tokens for a principal
    #[instrument(skip(self))]
    pub async fn active_sessions(&self, principal_id: PrincipalId) -> ServiceResult<i64> {
        Ok(self.ctx.token_ledger().count_active(principal_id).await?)
    }
}
