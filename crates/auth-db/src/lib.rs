//! # auth-db
//!
//! Database layer implementing the `CredentialStore` and `RefreshTokenLedger`
//! traits with PostgreSQL via SQLx.
//!
//! - Connection pool management with bounded acquire timeouts (fail closed)
//! - Database models with SQLx `FromRow` derives
//! - Store implementations; `rotate` and `revoke_all` use single-transaction
//!   conditional writes, never read-modify-write loops

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCredentialStore, PgRefreshTokenLedger};

/// Load the migration set that ships with this crate
///
/// Uses the runtime migration API; the compile-time `migrate!` macro lives
/// behind the sqlx `macros` feature, which this workspace leaves off.
pub async fn migrator() -> Result<sqlx::migrate::Migrator, sqlx::migrate::MigrateError> {
    sqlx::migrate::Migrator::new(std::path::Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/migrations"
    )))
    .await
}

/// Run the bundled migrations against the given pool
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    migrator().await?.run(pool).await
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    async fn test_migration_set_loads() {
        let migrator = super::migrator().await.unwrap();
        assert!(migrator.iter().any(|m| m.version == 1));
    }
}
