//! Audit event emission
//!
//! Authentication outcomes are emitted as fire-and-forget events on an
//! unbounded channel. A slow or absent consumer never blocks or fails the
//! authentication path; a dropped event is logged and forgotten.

use auth_core::PrincipalId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

/// Security-relevant authentication events
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    LoginSucceeded {
        principal_id: PrincipalId,
    },
    LoginFailed {
        principal_id: PrincipalId,
    },
    AccountLocked {
        principal_id: PrincipalId,
        locked_until: DateTime<Utc>,
    },
    LoginRejectedLocked {
        principal_id: PrincipalId,
        locked_until: DateTime<Utc>,
    },
    TokenRefreshed {
        principal_id: PrincipalId,
    },
    RefreshReuseDetected {
        principal_id: PrincipalId,
    },
    LoggedOut {
        principal_id: PrincipalId,
        all_sessions: bool,
    },
    PrincipalCreated {
        principal_id: PrincipalId,
    },
}

/// Sender half of the audit channel
pub type AuditSender = mpsc::UnboundedSender<AuditEvent>;

/// Create an audit channel pair
#[must_use]
pub fn audit_channel() -> (AuditSender, mpsc::UnboundedReceiver<AuditEvent>) {
    mpsc::unbounded_channel()
}

/// Emit an event if a sink is attached; never blocks, never fails
pub fn emit(sender: Option<&AuditSender>, event: AuditEvent) {
    if let Some(tx) = sender {
        if tx.send(event).is_err() {
            tracing::debug!("Audit receiver dropped; event discarded");
        }
    }
}
