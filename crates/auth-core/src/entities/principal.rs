//! Principal entity - an account that can authenticate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque principal identifier
pub type PrincipalId = i64;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalStatus {
    Active,
    Inactive,
}

impl PrincipalStatus {
    /// Parse from the persisted text representation
    #[must_use]
    pub fn from_str_or_inactive(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Inactive,
        }
    }

    /// Text representation used by the persistence layer
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Principal entity - identity, credential hash, and lockout bookkeeping
///
/// `failed_attempts` and `locked_until` are mutated only through the
/// credential store as a side effect of authentication outcomes, never
/// directly by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub status: PrincipalStatus,
    pub failed_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Check if the account is active
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == PrincipalStatus::Active
    }

    /// Check if the account is locked as of `now`
    ///
    /// A lock is considered expired the instant `now >= locked_until`;
    /// expiry is computed lazily on read, no separate unlock action exists.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) => now < until,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn principal(locked_until: Option<DateTime<Utc>>) -> Principal {
        let now = Utc::now();
        Principal {
            id: 1,
            email: "admin@test.com".to_string(),
            username: "admin".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            status: PrincipalStatus::Active,
            failed_attempts: 0,
            locked_until,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_lock_expires_lazily() {
        let now = Utc::now();
        let p = principal(Some(now + Duration::minutes(30)));
        assert!(p.is_locked(now));
        assert!(!p.is_locked(now + Duration::minutes(30)));
        assert!(!p.is_locked(now + Duration::minutes(31)));
    }

    #[test]
    fn test_no_lock_timestamp_means_unlocked() {
        let p = principal(None);
        assert!(!p.is_locked(Utc::now()));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PrincipalStatus::from_str_or_inactive("active"), PrincipalStatus::Active);
        assert_eq!(PrincipalStatus::from_str_or_inactive("inactive"), PrincipalStatus::Inactive);
        assert_eq!(PrincipalStatus::from_str_or_inactive("garbage"), PrincipalStatus::Inactive);
        assert_eq!(PrincipalStatus::Active.as_str(), "active");
    }
}
