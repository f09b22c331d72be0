//! Database models with SQLx `FromRow` derives

mod principal;
mod refresh_token;

pub use principal::PrincipalModel;
pub use refresh_token::RefreshTokenModel;
