//! Domain entities

mod principal;
mod refresh_token;

pub use principal::{Principal, PrincipalId, PrincipalStatus};
pub use refresh_token::RefreshTokenRecord;
