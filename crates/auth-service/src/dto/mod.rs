//! Data transfer objects for authentication requests and responses

pub mod requests;
pub mod responses;

pub use requests::{CreatePrincipalRequest, LoginRequest, LogoutRequest, RefreshRequest};
pub use responses::{AuthenticatedPrincipal, PrincipalResponse, TokenResponse};
