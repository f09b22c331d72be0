//! # auth-cache
//!
//! Redis caching layer for access token revocation.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Revocation Blacklist**: Self-evicting set of revoked access tokens
//!
//! ## Example
//!
//! ```ignore
//! use auth_cache::{RedisPool, RedisPoolConfig, TokenBlacklist};
//! use auth_core::RevocationCache;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let blacklist = TokenBlacklist::new(pool);
//!
//! blacklist.add(&fingerprint, remaining_ttl).await?;
//! assert!(blacklist.contains(&fingerprint).await?);
//! ```

pub mod pool;
pub mod revocation;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export revocation types
pub use revocation::{TokenBlacklist, BLACKLIST_PREFIX};
