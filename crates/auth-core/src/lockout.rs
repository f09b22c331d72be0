//! Brute-force lockout policy
//!
//! Pure decision logic: given the current attempt history and the clock,
//! decide whether an authentication attempt may proceed. All mutation of the
//! underlying counters happens in the credential store; this module never
//! touches state.

use chrono::{DateTime, Duration, Utc};

use crate::entities::Principal;

/// Outcome of a lockout check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutDecision {
    /// The attempt may proceed to password verification
    Allow,
    /// The account is locked until the given instant; reject before
    /// verifying the password
    Locked { until: DateTime<Utc> },
    /// Recording one more failure would cross the threshold and lock the
    /// account until the given instant
    WouldLock { until: DateTime<Utc> },
}

/// Lockout policy parameters
///
/// The lock window is fixed from the moment of the triggering failure:
/// attempts made while a lock is active are rejected at the lock gate and
/// never reach the counter, so continued hammering cannot extend the window.
/// The counter survives lock expiry and resets only on a successful
/// authentication, preserving consecutive-failure semantics.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Consecutive failures that trigger a lock
    pub max_failed_attempts: i32,
    /// Lock duration from the triggering failure
    pub lock_duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lock_duration: Duration::minutes(30),
        }
    }
}

impl LockoutPolicy {
    #[must_use]
    pub fn new(max_failed_attempts: i32, lock_duration: Duration) -> Self {
        Self {
            max_failed_attempts,
            lock_duration,
        }
    }

    /// Decide whether an attempt for `principal` may proceed at `now`
    #[must_use]
    pub fn check(&self, principal: &Principal, now: DateTime<Utc>) -> LockoutDecision {
        if let Some(until) = principal.locked_until {
            if now < until {
                return LockoutDecision::Locked { until };
            }
        }

        if principal.failed_attempts + 1 >= self.max_failed_attempts {
            return LockoutDecision::WouldLock {
                until: now + self.lock_duration,
            };
        }

        LockoutDecision::Allow
    }

    /// The lock expiry a failure recorded at `now` would produce, if the
    /// failure crosses the threshold
    #[must_use]
    pub fn lock_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.lock_duration
    }
}
