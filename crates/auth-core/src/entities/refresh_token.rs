//! Refresh token ledger record

use chrono::{DateTime, Utc};

use super::PrincipalId;

/// One row per issued refresh token. The raw token is never stored; only a
/// one-way fingerprint. `superseded_by` links a rotated token to its
/// successor and is only ever set together with `revoked_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub owner_id: PrincipalId,
    pub token_fingerprint: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub superseded_by: Option<i64>,
}

impl RefreshTokenRecord {
    /// Check if the record is past its expiry
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the record has been revoked (by rotation or logout)
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// A record is valid iff it is neither revoked nor expired
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_in: Duration, revoked: bool) -> RefreshTokenRecord {
        let now = Utc::now();
        RefreshTokenRecord {
            id: 1,
            owner_id: 42,
            token_fingerprint: "fp".to_string(),
            issued_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
            superseded_by: None,
        }
    }

    #[test]
    fn test_live_record_is_valid() {
        assert!(record(Duration::days(7), false).is_valid());
    }

    #[test]
    fn test_revoked_record_is_invalid() {
        let r = record(Duration::days(7), true);
        assert!(r.is_revoked());
        assert!(!r.is_valid());
    }

    #[test]
    fn test_expired_record_is_invalid() {
        let r = record(Duration::seconds(-1), false);
        assert!(r.is_expired());
        assert!(!r.is_valid());
    }
}
