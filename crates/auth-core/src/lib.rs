//! # auth-core
//!
//! Domain layer containing entities, the lockout policy, domain errors, and
//! store traits. This crate has zero dependencies on infrastructure
//! (database, cache, web framework, etc.).

pub mod entities;
pub mod error;
pub mod lockout;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Principal, PrincipalId, PrincipalStatus, RefreshTokenRecord};
pub use error::DomainError;
pub use lockout::{LockoutDecision, LockoutPolicy};
pub use traits::{CredentialStore, NewPrincipal, RefreshTokenLedger, RepoResult, RevocationCache};
