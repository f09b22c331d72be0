//! Asymmetric token signer
//!
//! Signs and verifies bearer tokens with an RS256 key pair loaded once at
//! startup. Stateless: verification never consults external state, so a
//! verified-but-revoked token still needs the revocation cache check upstream.

use auth_core::{DomainError, PrincipalId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::path::Path;

use super::claims::{Claims, TokenKind, TokenPair};

/// JWT signer holding the process-lifetime key pair
#[derive(Clone)]
pub struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl Signer {
    /// Create a signer from PEM-encoded RSA key material
    ///
    /// # Errors
    /// Returns an error if either PEM is not a valid RSA key
    pub fn from_rsa_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| DomainError::ValidationError(format!("Invalid private key PEM: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| DomainError::ValidationError(format!("Invalid public key PEM: {e}")))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    /// Create a signer by reading the key pair from PEM files
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or does not hold an RSA key
    pub fn from_pem_files(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self, DomainError> {
        let private_pem = std::fs::read(private_key_path.as_ref()).map_err(|e| {
            DomainError::ValidationError(format!("Cannot read private key file: {e}"))
        })?;
        let public_pem = std::fs::read(public_key_path.as_ref()).map_err(|e| {
            DomainError::ValidationError(format!("Cannot read public key file: {e}"))
        })?;

        Self::from_rsa_pem(
            &private_pem,
            &public_pem,
            access_token_expiry,
            refresh_token_expiry,
        )
    }

    /// Access-token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Refresh-token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue a signed token of the given kind
    ///
    /// Email is carried on access tokens only; refresh tokens hold the
    /// minimal claim set.
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn issue(
        &self,
        kind: TokenKind,
        principal_id: PrincipalId,
        username: &str,
        email: Option<&str>,
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_token_expiry,
            TokenKind::Refresh => self.refresh_token_expiry,
        };

        let claims = Claims {
            sub: username.to_string(),
            principal_id,
            email: match kind {
                TokenKind::Access => email.map(str::to_string),
                TokenKind::Refresh => None,
            },
            kind,
            jti: new_jti(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::ValidationError(format!("Token encoding failed: {e}")))
    }

    /// Issue an access + refresh pair for a principal
    ///
    /// # Errors
    /// Returns an error if encoding fails
    pub fn issue_pair(
        &self,
        principal_id: PrincipalId,
        username: &str,
        email: &str,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.issue(TokenKind::Access, principal_id, username, Some(email))?;
        let refresh_token = self.issue(TokenKind::Refresh, principal_id, username, None)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Verify signature and structure, rejecting expired tokens
    ///
    /// # Errors
    /// `TokenExpired` past the embedded expiry, `TokenMalformed` otherwise
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => DomainError::TokenExpired,
                _ => DomainError::TokenMalformed,
            })?;

        Ok(token_data.claims)
    }

    /// Verify signature and structure only, accepting an expired token
    ///
    /// Used by logout, which must identify the owner of a token that may
    /// already be past its expiry.
    ///
    /// # Errors
    /// `TokenMalformed` when the signature or structure is invalid
    pub fn verify_allow_expired(&self, token: &str) -> Result<Claims, DomainError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::TokenMalformed)
    }

    /// Check expiry; a malformed token is treated as expired (fail safe)
    #[must_use]
    pub fn is_expired(&self, token: &str) -> bool {
        match self.verify_allow_expired(token) {
            Ok(claims) => claims.is_expired(),
            Err(_) => true,
        }
    }

    /// Verify and require an access token
    ///
    /// # Errors
    /// Fails when invalid, expired, or not of ACCESS kind
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify(token)?;
        if !claims.is_access_token() {
            return Err(DomainError::TokenMalformed);
        }
        Ok(claims)
    }

    /// Verify and require a refresh token
    ///
    /// # Errors
    /// Fails when invalid, expired, or not of REFRESH kind
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify(token)?;
        if !claims.is_refresh_token() {
            return Err(DomainError::TokenMalformed);
        }
        Ok(claims)
    }
}

/// Random token identifier. `iat` has second precision, so uniqueness of
/// the encoded token rests entirely on this claim.
fn new_jti() -> String {
    format!("{:032x}", rand::random::<u128>())
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
