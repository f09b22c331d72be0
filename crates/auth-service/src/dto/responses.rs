//! Response DTOs for authentication operations

use auth_common::TokenPair;
use auth_core::{Principal, PrincipalId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Issued token pair response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

/// Identity attached to a request after access-token verification
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedPrincipal {
    pub principal_id: PrincipalId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Principal response; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub id: PrincipalId,
    pub email: String,
    pub username: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email.clone(),
            username: principal.username.clone(),
            status: principal.status.as_str().to_string(),
            last_login_at: principal.last_login_at,
            created_at: principal.created_at,
        }
    }
}
