//! Access token revocation blacklist.

mod token_blacklist;

pub use token_blacklist::{TokenBlacklist, BLACKLIST_PREFIX};
