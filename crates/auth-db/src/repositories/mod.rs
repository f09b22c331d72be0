//! PostgreSQL repository implementations

mod credential_store;
mod error;
mod refresh_token_ledger;

pub use credential_store::PgCredentialStore;
pub use refresh_token_ledger::PgRefreshTokenLedger;
