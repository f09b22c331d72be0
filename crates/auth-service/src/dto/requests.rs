//! Request DTOs for authentication operations

use serde::Deserialize;

/// Login request; `identifier` matches email or username case-insensitively
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Logout request. The access token identifies the session; the refresh
/// token, when present, narrows revocation to a single session.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Principal provisioning request
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrincipalRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}
