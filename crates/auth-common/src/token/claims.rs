//! JWT claims structures

use auth_core::PrincipalId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Token kind enum
///
/// The two kinds share one encoding and signing mechanism but carry
/// different claim sets and expiry horizons, and are never cross-acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
///
/// `jti` makes every issued token unique even when two tokens for the same
/// principal are minted within the same second; the ledger fingerprint and
/// the revocation blacklist both depend on token bytes never colliding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Principal ID
    pub principal_id: PrincipalId,
    /// Email (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Token kind (access or refresh)
    pub kind: TokenKind,
    /// Unique token identifier
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Seconds until the embedded expiry; zero once past it
    #[must_use]
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        u64::try_from(remaining).unwrap_or(0)
    }

    /// Check if this is an access token
    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.kind == TokenKind::Access
    }

    /// Check if this is a refresh token
    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.kind == TokenKind::Refresh
    }
}

/// Token pair containing access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(kind: TokenKind, exp: i64) -> Claims {
        Claims {
            sub: "admin".to_string(),
            principal_id: 1,
            email: None,
            kind,
            jti: "test-jti".to_string(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_kind_checks() {
        assert!(claims(TokenKind::Access, i64::MAX).is_access_token());
        assert!(!claims(TokenKind::Access, i64::MAX).is_refresh_token());
        assert!(claims(TokenKind::Refresh, i64::MAX).is_refresh_token());
    }

    #[test]
    fn test_expiry() {
        assert!(claims(TokenKind::Access, 0).is_expired());
        assert!(!claims(TokenKind::Access, i64::MAX).is_expired());
        assert_eq!(claims(TokenKind::Access, 0).remaining_ttl_seconds(), 0);
        let future = Utc::now().timestamp() + 100;
        let remaining = claims(TokenKind::Access, future).remaining_ttl_seconds();
        assert!((98..=100).contains(&remaining));
    }
}
