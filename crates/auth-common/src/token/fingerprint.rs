//! One-way token fingerprinting
//!
//! The refresh-token ledger never stores raw tokens; rows are keyed by a
//! SHA-256 fingerprint of the opaque token string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Compute the ledger fingerprint for a raw token
#[must_use]
pub fn fingerprint_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    STANDARD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint_token("some.refresh.token");
        let b = fingerprint_token("some.refresh.token");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_from_input() {
        let token = "some.refresh.token";
        let fp = fingerprint_token(token);
        assert_ne!(fp, token);
        // SHA-256 digest is 32 bytes, 44 chars in base64
        assert_eq!(fp.len(), 44);
    }

    #[test]
    fn test_different_tokens_different_fingerprints() {
        assert_ne!(fingerprint_token("token-a"), fingerprint_token("token-b"));
    }
}
