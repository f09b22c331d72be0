//! Authentication flows and orchestration
//!
//! The service layer owns cross-store invariants: failure ordering in login,
//! rotation reuse handling, and blacklist-before-signature on the request
//! path.

pub mod audit;
pub mod auth;
pub mod context;
pub mod error;

pub use audit::{audit_channel, emit, AuditEvent, AuditSender};
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
