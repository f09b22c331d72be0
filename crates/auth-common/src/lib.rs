//! # auth-common
//!
//! Shared utilities including configuration, error handling, token signing,
//! password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod token;

// Re-export commonly used types at crate root
pub use auth::{hash_password, validate_password_strength, verify_password};
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, JwtConfig, LockoutConfig, RedisConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
pub use token::{fingerprint_token, Claims, Signer, TokenKind, TokenPair};
