//! Bearer token signing, verification, and fingerprinting

mod claims;
mod fingerprint;
mod signer;

pub use claims::{Claims, TokenKind, TokenPair};
pub use fingerprint::fingerprint_token;
pub use signer::Signer;
